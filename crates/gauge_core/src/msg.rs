use crate::{CountOutcome, EditTicket, RequestEpoch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the text; carries the full new text.
    TextEdited(String),
    /// User picked a model profile.
    ModelSelected(String),
    /// User switched chat mode on or off.
    ChatModeSet(bool),
    /// The quiet interval started for `ticket` elapsed.
    DebounceElapsed { ticket: EditTicket },
    /// The counting service answered the request committed under `epoch`.
    CountFinished {
        epoch: RequestEpoch,
        outcome: CountOutcome,
    },
    /// The transient notice timed out or was dismissed.
    NoticeDismissed,
    /// The view is closing; nothing may be committed afterwards.
    Teardown,
    /// Fallback for unmapped input.
    NoOp,
}
