//! Line-oriented view layer used by the binary.
//!
//! Turns input lines into commands and items into output lines. Holds
//! no state; everything goes through bound actions.

use std::fmt::Write as _;

use thiserror::Error;

use crate::todos::{Item, ItemId, TodoState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Text is already trimmed and non-empty.
    Add(String),
    Toggle(ItemId),
    Remove(ItemId),
    List,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Unknown command '{0}' (expected add, toggle, remove, list or quit)")]
    UnknownCommand(String),

    #[error("'{command}' needs an item id")]
    MissingId { command: &'static str },

    #[error("'{0}' is not a valid item id")]
    InvalidId(String),
}

/// Trim `raw`, rejecting what is empty afterwards.
pub fn normalize_text(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse one input line.
///
/// Blank lines and `add` without text yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ViewCommand>, ViewError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));

    match command {
        "add" => Ok(normalize_text(rest).map(ViewCommand::Add)),
        "toggle" => parse_id("toggle", rest).map(|id| Some(ViewCommand::Toggle(id))),
        "remove" | "rm" => parse_id("remove", rest).map(|id| Some(ViewCommand::Remove(id))),
        "list" | "ls" => Ok(Some(ViewCommand::List)),
        "quit" | "exit" => Ok(Some(ViewCommand::Quit)),
        other => Err(ViewError::UnknownCommand(other.to_string())),
    }
}

fn parse_id(command: &'static str, rest: &str) -> Result<ItemId, ViewError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(ViewError::MissingId { command });
    }
    raw.parse()
        .map_err(|_| ViewError::InvalidId(raw.to_string()))
}

pub fn render_item(item: &Item) -> String {
    let mark = if item.complete { 'x' } else { ' ' };
    format!("[{mark}] {} {}", item.id, item.text)
}

/// One line per item, in display order.
pub fn render_state(state: &TodoState) -> String {
    if state.items.is_empty() {
        return "(no todos)\n".to_string();
    }
    let mut out = String::new();
    for item in &state.items {
        let _ = writeln!(out, "{}", render_item(item));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_text() {
        assert_eq!(
            parse_command("add   buy milk  "),
            Ok(Some(ViewCommand::Add("buy milk".to_string())))
        );
    }

    #[test]
    fn add_with_blank_text_is_ignored() {
        assert_eq!(parse_command("add    "), Ok(None));
        assert_eq!(parse_command("add"), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn toggle_and_remove_take_ids() {
        assert_eq!(parse_command("toggle 12"), Ok(Some(ViewCommand::Toggle(12))));
        assert_eq!(parse_command("rm 3"), Ok(Some(ViewCommand::Remove(3))));
        assert_eq!(
            parse_command("toggle"),
            Err(ViewError::MissingId { command: "toggle" })
        );
        assert_eq!(
            parse_command("remove abc"),
            Err(ViewError::InvalidId("abc".to_string()))
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_command("undo"),
            Err(ViewError::UnknownCommand("undo".to_string()))
        );
    }

    #[test]
    fn render_marks_completed_items() {
        let mut item = Item::new(5, "walk");
        assert_eq!(render_item(&item), "[ ] 5 walk");
        item.complete = true;
        assert_eq!(render_item(&item), "[x] 5 walk");
    }

    #[test]
    fn render_empty_state() {
        assert_eq!(render_state(&TodoState::default()), "(no todos)\n");
    }
}
