use std::time::Instant;

use almanack_core::{update, ResourceMsg, ResourceState};

#[test]
fn unknown_generation_is_noop() {
    let state = ResourceState::<u32>::new();
    let msg = ResourceMsg::LoadSettled {
        generation: 9,
        result: Ok(1),
        at: Instant::now(),
    };
    let (next, effects) = update(state.clone(), msg);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn duplicate_request_is_noop() {
    let at = Instant::now();
    let (state, _) = update(
        ResourceState::<u32>::new(),
        ResourceMsg::LoadRequested { force: false, at },
    );
    let (next, effects) = update(
        state.clone(),
        ResourceMsg::LoadRequested { force: false, at },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
