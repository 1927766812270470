use todoflow::mvi::Reducer;
use todoflow::todos::{Action, Item, TodoReducer, TodoState};

fn states() -> Vec<TodoState> {
    let mut done = Item::new(20, "done");
    done.complete = true;
    vec![
        TodoState::default(),
        TodoState {
            items: vec![Item::new(1, "a")],
            revision_count: 1,
        },
        TodoState {
            items: vec![Item::new(10, "x"), done, Item::new(30, "x")],
            revision_count: 17,
        },
    ]
}

const IDS: [i64; 5] = [1, 10, 20, 30, 99];

#[test]
fn toggle_twice_is_identity() {
    for state in states() {
        for id in IDS {
            let once = TodoReducer::reduce(state.clone(), Action::Toggle(id));
            let twice = TodoReducer::reduce(once, Action::Toggle(id));
            assert_eq!(twice, state, "id {id}");
        }
    }
}

#[test]
fn remove_is_absorbing() {
    for state in states() {
        for id in IDS {
            let once = TodoReducer::reduce(state.clone(), Action::Remove(id));
            let twice = TodoReducer::reduce(once.clone(), Action::Remove(id));
            assert_eq!(twice, once, "id {id}");
        }
    }
}

#[test]
fn set_replaces_wholesale() {
    let replacement = vec![Item::new(5, "five"), Item::new(4, "four")];
    for state in states() {
        let next = TodoReducer::reduce(state.clone(), Action::Set(replacement.clone()));
        assert_eq!(next.items, replacement);
        assert_eq!(next.revision_count, state.revision_count + 1);
    }
}

#[test]
fn add_preserves_prior_order_and_appends() {
    let item = Item::new(77, "new");
    for state in states() {
        let next = TodoReducer::reduce(state.clone(), Action::Add(item.clone()));
        let mut expected = state.items.clone();
        expected.push(item.clone());
        assert_eq!(next.items, expected);
    }
}

#[test]
fn unknown_action_is_identity() {
    for state in states() {
        assert_eq!(TodoReducer::reduce(state.clone(), Action::Unknown), state);
    }
}

#[test]
fn reducer_is_deterministic() {
    for state in states() {
        let action = Action::Add(Item::new(3, "same"));
        assert_eq!(
            TodoReducer::reduce(state.clone(), action.clone()),
            TodoReducer::reduce(state, action)
        );
    }
}

#[test]
fn revision_only_moves_forward_on_set_and_add() {
    let script = vec![
        Action::Set(vec![]),
        Action::Add(Item::new(1, "a")),
        Action::Toggle(1),
        Action::Add(Item::new(2, "b")),
        Action::Remove(1),
        Action::Unknown,
        Action::Toggle(2),
        Action::Set(vec![Item::new(3, "c")]),
        Action::Remove(3),
    ];

    let mut state = TodoState::default();
    for action in script {
        let bumps = matches!(action, Action::Set(_) | Action::Add(_));
        let before = state.revision_count;
        state = TodoReducer::reduce(state, action);
        if bumps {
            assert_eq!(state.revision_count, before + 1);
        } else {
            assert_eq!(state.revision_count, before);
        }
    }
    assert_eq!(state.revision_count, 4);
    assert!(state.items.is_empty());
}
