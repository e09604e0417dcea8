//! JSON bodies exchanged with the counting service.
use gauge_core::CountRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum RequestBody<'a> {
    Simple {
        text: &'a str,
        model: &'a str,
    },
    Chat {
        messages: Vec<WireMessage<'a>>,
        model: &'a str,
    },
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a CountRequest> for RequestBody<'a> {
    fn from(request: &'a CountRequest) -> Self {
        match request {
            CountRequest::Simple { text, model_id } => RequestBody::Simple {
                text,
                model: model_id,
            },
            CountRequest::Chat { messages, model_id } => RequestBody::Chat {
                messages: messages
                    .iter()
                    .map(|message| WireMessage {
                        role: message.role.as_str(),
                        content: &message.content,
                    })
                    .collect(),
                model: model_id,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountReply {
    pub tokens: u64,
}

/// Error payload; `detail` is a string for most failures and a list for
/// request validation errors.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorReply {
    pub detail: serde_json::Value,
}

impl ErrorReply {
    pub(crate) fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
