//! Token gauge engine: counting-service client, debounce timers and the IO thread.
mod client;
mod debounce;
mod engine;
mod types;
mod wire;

pub use client::{ClientSettings, CountClient, Endpoint, ReqwestCountClient};
pub use debounce::{ChannelEventSink, DebounceScheduler, EventSink, DEFAULT_QUIET_INTERVAL};
pub use engine::{EngineHandle, EngineSettings};
pub use types::{EngineError, EngineEvent};
