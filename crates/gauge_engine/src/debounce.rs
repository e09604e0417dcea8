use std::sync::{mpsc, Arc};
use std::time::Duration;

use gauge_core::EditTicket;
use gauge_logging::{gauge_debug, gauge_trace};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(500);

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Cancel-and-restart timer: emits [`EngineEvent::DebounceElapsed`] once the
/// quiet interval passes without another [`restart`](Self::restart).
///
/// Pending timers are cancelled on shutdown and on drop.
pub struct DebounceScheduler {
    runtime: Handle,
    quiet: Duration,
    sink: Arc<dyn EventSink>,
    pending: Option<CancellationToken>,
    closed: bool,
}

impl DebounceScheduler {
    pub fn new(runtime: Handle, quiet: Duration, sink: Arc<dyn EventSink>) -> Self {
        Self {
            runtime,
            quiet,
            sink,
            pending: None,
            closed: false,
        }
    }

    pub fn restart(&mut self, ticket: EditTicket) {
        if self.closed {
            gauge_debug!("Scheduler closed; ignoring restart for ticket {}", ticket);
            return;
        }
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let sink = self.sink.clone();
        let quiet = self.quiet;
        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    gauge_trace!("Quiet interval for ticket {} cancelled", ticket);
                }
                _ = tokio::time::sleep(quiet) => {
                    sink.emit(EngineEvent::DebounceElapsed { ticket });
                    // Marks the timer as no longer pending.
                    cancelled.cancel();
                }
            }
        });
        self.pending = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Cancels the pending timer and refuses further restarts.
    pub fn shutdown(&mut self) {
        self.cancel();
        self.closed = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
