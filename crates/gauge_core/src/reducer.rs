use gauge_logging::{gauge_debug, gauge_warn};

use crate::{AppState, CountOutcome, RequestEpoch};

impl AppState {
    /// Applies a service outcome if it belongs to the latest commit.
    ///
    /// Returns `false` when the outcome was stale and discarded.
    pub(crate) fn apply_outcome(&mut self, epoch: RequestEpoch, outcome: CountOutcome) -> bool {
        if epoch != self.epoch() || self.is_closed() {
            gauge_debug!(
                "Discarding outcome for epoch {} (latest {})",
                epoch.value(),
                self.epoch().value()
            );
            return false;
        }
        match outcome {
            Ok(tokens) => self.show_tokens(tokens),
            Err(failure) => {
                gauge_warn!("Count for epoch {} failed: {}", epoch.value(), failure);
                self.show_failure(format!("API error: {failure}"));
            }
        }
        true
    }
}
