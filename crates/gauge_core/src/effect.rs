use crate::{CountRequest, EditTicket, RequestEpoch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cancel any pending quiet-interval timer and start a new one for `ticket`.
    RestartDebounce { ticket: EditTicket },
    /// Cancel the pending timer without starting another.
    CancelDebounce,
    /// Send `request` to the counting service, tagged with its commit epoch.
    SendCount {
        epoch: RequestEpoch,
        request: CountRequest,
    },
}
