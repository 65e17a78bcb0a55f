use almanack_logging::{almanack_debug, almanack_trace};

use crate::{ResourceEffect, ResourceMsg, ResourceState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update<T>(
    mut state: ResourceState<T>,
    msg: ResourceMsg<T>,
) -> (ResourceState<T>, Vec<ResourceEffect>) {
    let effects = match msg {
        ResourceMsg::LoadRequested { force, at } => {
            if state.is_loading() && !force {
                almanack_trace!(
                    "load dropped, generation {} still in flight",
                    state.generation()
                );
                return (state, Vec::new());
            }
            if state.is_loading() {
                almanack_debug!(
                    "forced load supersedes generation {}",
                    state.generation()
                );
            }
            let generation = state.begin_load(at);
            vec![ResourceEffect::Exec { generation }]
        }
        ResourceMsg::LoadSettled {
            generation,
            result,
            at,
        } => {
            if generation != state.generation() {
                almanack_debug!(
                    "discarding superseded result of generation {} (current {})",
                    generation,
                    state.generation()
                );
                return (state, Vec::new());
            }
            state.settle(result, at);
            refresh_effect(&state)
        }
        ResourceMsg::LoadAbandoned { generation, at } => {
            if generation != state.generation() || !state.is_loading() {
                return (state, Vec::new());
            }
            almanack_debug!("load of generation {} abandoned", generation);
            state.abandon(at);
            refresh_effect(&state)
        }
    };

    (state, effects)
}

fn refresh_effect<T>(state: &ResourceState<T>) -> Vec<ResourceEffect> {
    state
        .throttle_expires_at()
        .map(|expires| ResourceEffect::RefreshAt { at: expires })
        .into_iter()
        .collect()
}
