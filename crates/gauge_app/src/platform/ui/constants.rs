use std::time::Duration;

/// How long the input poll waits before checking engine events.
pub const POLL_INTERVAL: Duration = Duration::from_millis(25);
/// Lifetime of an error notice on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

pub const TITLE: &str = "Token Counter";
pub const CHAT_MODE_LABEL: &str = "Count full chat prompt (adds hidden system / role tokens)";
pub const INPUT_PLACEHOLDER: &str = "Paste or type text here…";
pub const COUNTING_LABEL: &str = "Counting…";
pub const KEY_HINTS: &str = "Tab/Shift+Tab model • Ctrl+T chat mode • Ctrl+U clear • Esc quit";
