use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gauge_core::{CountRequest, EditTicket, RequestEpoch};
use gauge_logging::{gauge_debug, gauge_warn};
use tokio::runtime::Runtime;

use crate::client::{ClientSettings, CountClient, ReqwestCountClient};
use crate::debounce::{ChannelEventSink, DebounceScheduler, EventSink, DEFAULT_QUIET_INTERVAL};
use crate::{EngineError, EngineEvent};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub client: ClientSettings,
    pub quiet_interval: Duration,
}

impl EngineSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ClientSettings::new(base_url),
            quiet_interval: DEFAULT_QUIET_INTERVAL,
        }
    }
}

enum EngineCommand {
    RestartDebounce {
        ticket: EditTicket,
    },
    CancelDebounce,
    Count {
        epoch: RequestEpoch,
        request: CountRequest,
    },
    Shutdown,
}

/// Owns the IO thread: debounce timers and counting-service calls run on its
/// tokio runtime, results come back as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let client = ReqwestCountClient::new(settings.client)?;
        Self::with_client(settings.quiet_interval, Arc::new(client))
    }

    pub fn with_client(
        quiet_interval: Duration,
        client: Arc<dyn CountClient>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("gauge-io")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("gauge-engine".to_string())
            .spawn(move || run_engine(runtime, quiet_interval, client, cmd_rx, event_tx))?;

        Ok(Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        })
    }

    pub fn restart_debounce(&self, ticket: EditTicket) {
        self.send(EngineCommand::RestartDebounce { ticket });
    }

    pub fn cancel_debounce(&self) {
        self.send(EngineCommand::CancelDebounce);
    }

    pub fn count(&self, epoch: RequestEpoch, request: CountRequest) {
        self.send(EngineCommand::Count { epoch, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            gauge_warn!("Engine thread is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_engine(
    runtime: Runtime,
    quiet_interval: Duration,
    client: Arc<dyn CountClient>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
    let mut scheduler =
        DebounceScheduler::new(runtime.handle().clone(), quiet_interval, sink.clone());

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::RestartDebounce { ticket } => scheduler.restart(ticket),
            EngineCommand::CancelDebounce => scheduler.cancel(),
            EngineCommand::Count { epoch, request } => {
                let client = client.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    let outcome = client.count(&request).await;
                    sink.emit(EngineEvent::CountCompleted { epoch, outcome });
                });
            }
            EngineCommand::Shutdown => break,
        }
    }

    gauge_debug!("Engine shutting down");
    scheduler.shutdown();
    drop(scheduler);
    // In-flight calls are abandoned, not awaited.
    runtime.shutdown_background();
}
