use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use todoflow::config::Config;
use todoflow::logging::init_tracing;
use todoflow::persist::FileSlot;
use todoflow::store::Store;
use todoflow::todos::AddMode;
use todoflow::view::{parse_command, render_state, ViewCommand};

/// Persistent todo list driven from stdin.
///
/// Commands: `add <text>`, `toggle <id>`, `remove <id>`, `list`, `quit`.
#[derive(Debug, Parser)]
#[command(name = "todoflow", version)]
struct Cli {
    /// Config file (default: <config dir>/todoflow/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured add mode.
    #[arg(long, value_enum)]
    mode: Option<AddMode>,

    /// Override the configured storage file.
    #[arg(long)]
    storage: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.logging.filter);

    let slot = FileSlot::new(config.storage.path.clone());
    tracing::info!(
        storage = %slot.path().display(),
        mode = ?config.store.add_mode,
        "Starting todoflow"
    );

    let store = Store::builder()
        .add_mode(config.store.add_mode)
        .storage(Arc::new(slot))
        .start()
        .context("failed to start store")?;
    let actions = store.bind();

    // Re-render on every commit.
    let mut updates = store.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            print!("{}", render_state(&state));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };

        match parse_command(&line) {
            Ok(Some(ViewCommand::Add(text))) => (actions.add_todo)(text),
            Ok(Some(ViewCommand::Toggle(id))) => (actions.toggle_todo)(id),
            Ok(Some(ViewCommand::Remove(id))) => (actions.remove_todo)(id),
            Ok(Some(ViewCommand::List)) => print!("{}", render_state(&store.state())),
            Ok(Some(ViewCommand::Quit)) => break,
            Ok(None) => {}
            Err(err) => eprintln!("{err}"),
        }
    }

    drop(actions);
    store.shutdown().await.context("store did not shut down cleanly")?;
    renderer.abort();
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;

    if let Some(mode) = cli.mode {
        config.store.add_mode = mode;
    }
    if let Some(path) = &cli.storage {
        config.storage.path = path.clone();
    }
    config.validate().context("invalid config")?;
    Ok(config)
}
