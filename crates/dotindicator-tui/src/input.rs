use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Swipe the carousel to the next page
    SwipeNext,
    /// Swipe the carousel to the previous page
    SwipePrev,
    /// Grab the carousel, or let go of it
    ToggleHold,
    /// Skip the rest of the countdown
    Advance,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::SwipeNext,
        (KeyCode::Right, KeyModifiers::NONE) => Action::SwipeNext,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::SwipePrev,
        (KeyCode::Left, KeyModifiers::NONE) => Action::SwipePrev,

        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ToggleHold,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::Advance,

        _ => Action::None,
    }
}
