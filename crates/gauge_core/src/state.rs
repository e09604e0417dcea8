use std::sync::Arc;

use gauge_logging::gauge_debug;

use crate::view_model::{AppViewModel, ModelButtonView};
use crate::ModelCatalog;

/// Identifies the store notification a debounce timer was started for.
pub type EditTicket = u64;

/// Monotonic counter of commits; every outcome carries the epoch it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestEpoch(u64);

impl RequestEpoch {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub text: String,
    pub model_id: String,
    pub chat_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub tokens: Option<u64>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Debouncing,
    Counting,
    Showing,
    Failed,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    catalog: Arc<ModelCatalog>,
    input: InputState,
    display: DisplayState,
    phase: Phase,
    epoch: RequestEpoch,
    ticket: EditTicket,
    committed_ticket: EditTicket,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new(catalog: ModelCatalog) -> Self {
        let input = InputState {
            text: String::new(),
            model_id: catalog.first().id.clone(),
            chat_mode: false,
        };
        Self {
            catalog: Arc::new(catalog),
            input,
            display: DisplayState::default(),
            phase: Phase::Idle,
            epoch: RequestEpoch::default(),
            ticket: 0,
            committed_ticket: 0,
            notice: None,
            dirty: true,
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Epoch of the most recent commit.
    pub fn epoch(&self) -> RequestEpoch {
        self.epoch
    }

    pub fn ticket(&self) -> EditTicket {
        self.ticket
    }

    /// A quiet interval elapsing for `ticket` should commit.
    pub fn is_commit_due(&self, ticket: EditTicket) -> bool {
        !self.is_closed() && ticket == self.ticket && ticket > self.committed_ticket
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Returns whether the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns `true` when the text changed and a commit is now pending.
    pub(crate) fn set_text(&mut self, text: String) -> bool {
        if self.is_closed() || self.input.text == text {
            return false;
        }
        self.input.text = text;
        true
    }

    /// Unknown ids are rejected without touching state.
    pub(crate) fn set_model(&mut self, model_id: &str) -> bool {
        if self.is_closed() || self.input.model_id == model_id {
            return false;
        }
        if !self.catalog.contains(model_id) {
            gauge_debug!("Ignoring unknown model id {:?}", model_id);
            return false;
        }
        self.input.model_id = model_id.to_string();
        true
    }

    pub(crate) fn set_chat_mode(&mut self, chat_mode: bool) -> bool {
        if self.is_closed() || self.input.chat_mode == chat_mode {
            return false;
        }
        self.input.chat_mode = chat_mode;
        true
    }

    /// Records a store notification and returns the ticket for the restarted timer.
    pub(crate) fn begin_debounce(&mut self) -> EditTicket {
        self.ticket += 1;
        self.phase = Phase::Debouncing;
        self.dirty = true;
        self.ticket
    }

    /// Advances the epoch and returns it together with a snapshot of the input.
    pub(crate) fn commit(&mut self) -> (RequestEpoch, InputState) {
        self.committed_ticket = self.ticket;
        self.epoch = self.epoch.next();
        self.notice = None;
        self.dirty = true;
        (self.epoch, self.input.clone())
    }

    pub(crate) fn resolve_empty(&mut self) {
        self.display = DisplayState {
            tokens: None,
            loading: false,
        };
        self.phase = Phase::Idle;
    }

    pub(crate) fn start_counting(&mut self) {
        self.display.loading = true;
        self.phase = Phase::Counting;
    }

    pub(crate) fn show_tokens(&mut self, tokens: u64) {
        self.display = DisplayState {
            tokens: Some(tokens),
            loading: false,
        };
        self.notice = None;
        self.settle(Phase::Showing);
        self.dirty = true;
    }

    pub(crate) fn show_failure(&mut self, notice: String) {
        self.display = DisplayState {
            tokens: None,
            loading: false,
        };
        self.notice = Some(notice);
        self.settle(Phase::Failed);
        self.dirty = true;
    }

    /// A pending edit keeps the pipeline in `Debouncing`.
    fn settle(&mut self, phase: Phase) {
        if self.phase != Phase::Debouncing {
            self.phase = phase;
        }
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn close(&mut self) {
        self.phase = Phase::Closed;
        self.display.loading = false;
        self.dirty = true;
    }

    pub fn view(&self) -> AppViewModel {
        let models = self
            .catalog
            .profiles()
            .iter()
            .map(|profile| ModelButtonView {
                id: profile.id.clone(),
                label: profile.label.clone(),
                limit: self.catalog.limit_of(&profile.id),
                selected: profile.id == self.input.model_id,
            })
            .collect();

        let over_limit = match (self.display.tokens, self.catalog.get(&self.input.model_id)) {
            (Some(tokens), Some(profile)) => tokens > profile.context_limit,
            _ => false,
        };

        AppViewModel {
            text: self.input.text.clone(),
            model_id: self.input.model_id.clone(),
            chat_mode: self.input.chat_mode,
            models,
            tokens: self.display.tokens,
            loading: self.display.loading,
            phase: self.phase,
            notice: self.notice.clone(),
            selected_limit: self.catalog.limit_of(&self.input.model_id),
            over_limit,
            dirty: self.dirty,
        }
    }
}
