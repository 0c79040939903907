use mailer_core::{update, AppState, Msg};

#[test]
fn tick_leaves_state_unchanged() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
