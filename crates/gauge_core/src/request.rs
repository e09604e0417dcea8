use crate::InputState;

/// System prompt prepended to every chat-mode request.
pub const SYSTEM_PROMPT: &str = "You are helpful.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountRequest {
    /// Raw text, counted as-is.
    Simple { text: String, model_id: String },
    /// Simulated chat prompt: fixed system turn followed by the user's text.
    Chat {
        messages: Vec<ChatMessage>,
        model_id: String,
    },
}

impl CountRequest {
    pub fn model_id(&self) -> &str {
        match self {
            CountRequest::Simple { model_id, .. } | CountRequest::Chat { model_id, .. } => {
                model_id
            }
        }
    }
}

/// Builds the request for a committed snapshot.
///
/// Returns `None` when the text is empty or whitespace-only; no request is
/// issued for such input.
pub fn build_request(snapshot: &InputState) -> Option<CountRequest> {
    if snapshot.text.trim().is_empty() {
        return None;
    }
    let model_id = snapshot.model_id.clone();
    let request = if snapshot.chat_mode {
        CountRequest::Chat {
            messages: vec![
                ChatMessage::new(Role::System, SYSTEM_PROMPT),
                ChatMessage::new(Role::User, snapshot.text.clone()),
            ],
            model_id,
        }
    } else {
        CountRequest::Simple {
            text: snapshot.text.clone(),
            model_id,
        }
    };
    Some(request)
}
