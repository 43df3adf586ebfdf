use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Submit,
    Up,
    Down,
    Input(char),
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return AppAction::Quit;
        }
    }

    match key.code {
        KeyCode::Char('q') => AppAction::Quit,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

/// Keys while the edit modal has focus.
///
/// Letters are always text input here, so `q` does not quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Quit,
    Close,
    Save,
    Confirm,
    NextField,
    PrevField,
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Input(char),
    None,
}

pub fn map_modal_key(key: KeyEvent) -> ModalAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => ModalAction::Quit,
            KeyCode::Char('s') => ModalAction::Save,
            _ => ModalAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => ModalAction::Close,
        KeyCode::Enter => ModalAction::Confirm,
        KeyCode::Tab => ModalAction::NextField,
        KeyCode::BackTab => ModalAction::PrevField,
        KeyCode::Up => ModalAction::Up,
        KeyCode::Down => ModalAction::Down,
        KeyCode::Left => ModalAction::Left,
        KeyCode::Right => ModalAction::Right,
        KeyCode::Backspace => ModalAction::Backspace,
        KeyCode::Char(ch) => ModalAction::Input(ch),
        _ => ModalAction::None,
    }
}
