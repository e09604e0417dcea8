use gauge_core::{Effect, Msg};
use gauge_engine::{EngineEvent, EngineHandle};
use gauge_logging::{gauge_debug, gauge_info};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RestartDebounce { ticket } => {
                    gauge_debug!("RestartDebounce ticket={}", ticket);
                    self.engine.restart_debounce(ticket);
                }
                Effect::CancelDebounce => {
                    gauge_debug!("CancelDebounce");
                    self.engine.cancel_debounce();
                }
                Effect::SendCount { epoch, request } => {
                    gauge_info!(
                        "SendCount epoch={} model={}",
                        epoch.value(),
                        request.model_id()
                    );
                    self.engine.count(epoch, request);
                }
            }
        }
    }

    pub fn drain_messages(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { ticket } => Msg::DebounceElapsed { ticket },
        EngineEvent::CountCompleted { epoch, outcome } => Msg::CountFinished { epoch, outcome },
    }
}
