use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gauge_core::{InputState, ModelCatalog, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Dispatch(Msg),
    Redraw,
    Quit,
    Ignore,
}

pub fn map_event(event: Event, input: &InputState, catalog: &ModelCatalog) -> KeyAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key, input, catalog),
        Event::Paste(pasted) => edited(input, |text| text.push_str(&pasted)),
        Event::Resize(..) => KeyAction::Redraw,
        _ => KeyAction::Ignore,
    }
}

fn map_key(key: KeyEvent, input: &InputState, catalog: &ModelCatalog) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('t') if ctrl => KeyAction::Dispatch(Msg::ChatModeSet(!input.chat_mode)),
        KeyCode::Char('u') if ctrl => KeyAction::Dispatch(Msg::TextEdited(String::new())),
        KeyCode::Char(_) if ctrl => KeyAction::Ignore,
        KeyCode::Char(ch) => edited(input, |text| text.push(ch)),
        KeyCode::Enter => edited(input, |text| text.push('\n')),
        KeyCode::Backspace => edited(input, |text| {
            text.pop();
        }),
        KeyCode::Tab => KeyAction::Dispatch(Msg::ModelSelected(
            catalog.next_id(&input.model_id).to_string(),
        )),
        KeyCode::BackTab => KeyAction::Dispatch(Msg::ModelSelected(
            catalog.previous_id(&input.model_id).to_string(),
        )),
        _ => KeyAction::Ignore,
    }
}

fn edited(input: &InputState, edit: impl FnOnce(&mut String)) -> KeyAction {
    let mut text = input.text.clone();
    edit(&mut text);
    KeyAction::Dispatch(Msg::TextEdited(text))
}
