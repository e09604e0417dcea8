use gauge_logging::gauge_debug;

use crate::{build_request, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextEdited(text) => {
            let changed = state.set_text(text);
            restart_if(changed, &mut state)
        }
        Msg::ModelSelected(model_id) => {
            let changed = state.set_model(&model_id);
            restart_if(changed, &mut state)
        }
        Msg::ChatModeSet(chat_mode) => {
            let changed = state.set_chat_mode(chat_mode);
            restart_if(changed, &mut state)
        }
        Msg::DebounceElapsed { ticket } => {
            // A timer for a superseded edit may still fire if its message was
            // already queued when the restart happened.
            if !state.is_commit_due(ticket) {
                gauge_debug!(
                    "Ignoring quiet interval for ticket {} (latest {})",
                    ticket,
                    state.ticket()
                );
                return (state, Vec::new());
            }
            let (epoch, snapshot) = state.commit();
            match build_request(&snapshot) {
                Some(request) => {
                    state.start_counting();
                    vec![Effect::SendCount { epoch, request }]
                }
                None => {
                    state.resolve_empty();
                    Vec::new()
                }
            }
        }
        Msg::CountFinished { epoch, outcome } => {
            state.apply_outcome(epoch, outcome);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::Teardown => {
            if state.is_closed() {
                Vec::new()
            } else {
                state.close();
                vec![Effect::CancelDebounce]
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn restart_if(changed: bool, state: &mut AppState) -> Vec<Effect> {
    if !changed {
        return Vec::new();
    }
    let ticket = state.begin_debounce();
    vec![Effect::RestartDebounce { ticket }]
}
