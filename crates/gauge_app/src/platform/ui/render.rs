use gauge_core::{AppViewModel, ModelButtonView};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Normal,
    Dim,
    Accent,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub text: String,
    pub style: LineStyle,
}

impl ScreenLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Lines above and below the text area.
const CHROME_ROWS: usize = 10;

/// Lays out the whole screen for a `width` x `height` terminal.
pub fn render(view: &AppViewModel, width: u16, height: u16) -> Vec<ScreenLine> {
    let width = usize::from(width.max(1));
    let text_rows = usize::from(height).saturating_sub(CHROME_ROWS).max(1);
    let rule = "─".repeat(width.min(80));

    let mut lines = Vec::with_capacity(CHROME_ROWS + text_rows);
    lines.push(ScreenLine::new(TITLE, LineStyle::Title));
    let checkbox = if view.chat_mode { "[x]" } else { "[ ]" };
    lines.push(ScreenLine::new(
        format!("{checkbox} {CHAT_MODE_LABEL}"),
        LineStyle::Normal,
    ));
    lines.push(ScreenLine::new(rule.clone(), LineStyle::Dim));
    lines.extend(text_area(&view.text, width, text_rows));
    lines.push(ScreenLine::new(rule, LineStyle::Dim));
    lines.push(ScreenLine::new(limits_line(&view.models), LineStyle::Dim));
    lines.push(ScreenLine::new(model_buttons(&view.models), LineStyle::Accent));
    lines.push(ScreenLine::new(String::new(), LineStyle::Normal));
    lines.push(status_line(view));
    lines.push(match &view.notice {
        Some(notice) => ScreenLine::new(notice.clone(), LineStyle::Error),
        None => ScreenLine::new(String::new(), LineStyle::Normal),
    });
    lines.push(ScreenLine::new(KEY_HINTS, LineStyle::Dim));
    lines
}

fn text_area(text: &str, width: usize, rows: usize) -> Vec<ScreenLine> {
    if text.is_empty() {
        let mut area = vec![ScreenLine::new(INPUT_PLACEHOLDER, LineStyle::Dim)];
        area.resize(rows, ScreenLine::new(String::new(), LineStyle::Normal));
        return area;
    }

    let mut wrapped = wrap(&format!("{text}▏"), width);
    // Keep the end of the text, where the cursor is, in view.
    let skip = wrapped.len().saturating_sub(rows);
    wrapped.drain(..skip);
    let mut area: Vec<_> = wrapped
        .into_iter()
        .map(|line| ScreenLine::new(line, LineStyle::Normal))
        .collect();
    area.resize(rows, ScreenLine::new(String::new(), LineStyle::Normal));
    area
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }
    out
}

fn limits_line(models: &[ModelButtonView]) -> String {
    let limits: Vec<String> = models
        .iter()
        .map(|model| format!("{}: {}", model.label, model.limit))
        .collect();
    format!("Context limits → {} tokens", limits.join(" • "))
}

fn model_buttons(models: &[ModelButtonView]) -> String {
    models
        .iter()
        .map(|model| {
            if model.selected {
                format!("[{}]", model.label)
            } else {
                format!(" {} ", model.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_line(view: &AppViewModel) -> ScreenLine {
    if view.loading {
        return ScreenLine::new(COUNTING_LABEL, LineStyle::Normal);
    }
    match view.tokens {
        Some(tokens) if view.over_limit => ScreenLine::new(
            format!(
                "Tokens: {tokens} (over the {} token limit)",
                view.selected_limit
            ),
            LineStyle::Warning,
        ),
        Some(tokens) => ScreenLine::new(format!("Tokens: {tokens}"), LineStyle::Title),
        None => ScreenLine::new(String::new(), LineStyle::Normal),
    }
}
