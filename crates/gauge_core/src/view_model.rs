use crate::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelButtonView {
    pub id: String,
    pub label: String,
    pub limit: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub text: String,
    pub model_id: String,
    pub chat_mode: bool,
    pub models: Vec<ModelButtonView>,
    pub tokens: Option<u64>,
    pub loading: bool,
    pub phase: Phase,
    pub notice: Option<String>,
    /// Formatted context limit of the selected model.
    pub selected_limit: String,
    /// The last count exceeds the selected model's context limit.
    pub over_limit: bool,
    pub dirty: bool,
}
