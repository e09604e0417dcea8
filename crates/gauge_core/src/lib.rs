//! Token gauge core: pure state machine, request building and view-model helpers.
mod catalog;
mod effect;
mod msg;
mod outcome;
mod reducer;
mod request;
mod state;
mod update;
mod view_model;

pub use catalog::{format_with_commas, CatalogError, ModelCatalog, ModelProfile, UNKNOWN_LIMIT};
pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{CountFailure, CountOutcome, FailureKind};
pub use request::{build_request, ChatMessage, CountRequest, Role, SYSTEM_PROMPT};
pub use state::{AppState, DisplayState, EditTicket, InputState, Phase, RequestEpoch};
pub use update::update;
pub use view_model::{AppViewModel, ModelButtonView};
