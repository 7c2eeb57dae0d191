use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSection,
    PrevSection,
    /// Zero-based section index
    JumpToSection(usize),
    JumpToStart,
    JumpToEnd,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Section navigation
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Right, _) => Action::NextSection,
        (KeyCode::Tab, _) => Action::NextSection,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Left, _) => Action::PrevSection,
        (KeyCode::BackTab, _) => Action::PrevSection,
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::JumpToSection(c as usize - '1' as usize)
        }

        // Jump to the ends
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToStart,
        (KeyCode::Home, _) => Action::JumpToStart,
        (KeyCode::Char('G'), _) => Action::JumpToEnd,
        (KeyCode::End, _) => Action::JumpToEnd,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('l'))), Action::NextSection);
        assert_eq!(handle_key_event(key(KeyCode::Left)), Action::PrevSection);
        assert_eq!(handle_key_event(key(KeyCode::Char('1'))), Action::JumpToSection(0));
        assert_eq!(handle_key_event(key(KeyCode::Char('7'))), Action::JumpToSection(6));
        assert_eq!(handle_key_event(key(KeyCode::Home)), Action::JumpToStart);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Action::JumpToEnd
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), Action::None);
    }
}
