use super::mode::Mode;
use super::state::AppState;
use crate::keybindings::{Action, KeyBinding, KeyLookupResult};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub fn handle_key_event<C>(key: KeyEvent, state: &mut AppState<C>) {
    match state.mode {
        Mode::Navigate => handle_navigate_mode(key, state),
        Mode::Search => handle_search_mode(key, state),
    }
}

fn handle_navigate_mode<C>(key: KeyEvent, state: &mut AppState<C>) {
    state.clear_expired_pending_key();

    let pending = state.pending_key.take();
    state.pending_key_time = None;

    match state.keybindings.lookup_navigate(&key, pending) {
        KeyLookupResult::Action(action) => execute_navigate_action(action, state),
        KeyLookupResult::Pending => {
            state.pending_key = Some(KeyBinding::from_event(&key));
            state.pending_key_time = Some(Instant::now());
        }
        KeyLookupResult::None => {}
    }
}

fn execute_navigate_action<C>(action: Action, state: &mut AppState<C>) {
    match action {
        Action::MoveUp => state.move_cursor_up(),
        Action::MoveDown => state.move_cursor_down(),
        Action::MoveTop => state.move_to_top(),
        Action::MoveBottom => state.move_to_bottom(),
        Action::PageUp => state.move_cursor_by_page(false),
        Action::PageDown => state.move_cursor_by_page(true),
        Action::Copy => state.request_copy_selected(),
        Action::EnterSearch => {
            state.show_help = false;
            state.enter_search_mode();
        }
        Action::ClearQuery => state.clear_query(),
        Action::ToggleHelp => state.show_help = !state.show_help,
        Action::CloseHelp => state.show_help = false,
        Action::Quit => state.should_quit = true,
        _ => {}
    }
}

fn handle_search_mode<C>(key: KeyEvent, state: &mut AppState<C>) {
    if let Some(action) = state.keybindings.get_search_action(&key) {
        match action {
            Action::SearchCancel => {
                state.clear_query();
                state.mode = Mode::Navigate;
            }
            Action::SearchConfirm => state.mode = Mode::Navigate,
            Action::SearchBackspace => state.delete_query_char_before_cursor(),
            Action::SearchDelete => state.delete_query_char_at_cursor(),
            Action::SearchLeft => state.move_query_cursor_left(),
            Action::SearchRight => state.move_query_cursor_right(),
            Action::SearchHome => state.query_cursor_pos = 0,
            Action::SearchEnd => state.query_cursor_pos = state.session.query().len(),
            Action::SearchClear => state.clear_query(),
            Action::MoveUp => state.move_cursor_up(),
            Action::MoveDown => state.move_cursor_down(),
            _ => {}
        }
        return;
    }

    if let KeyCode::Char(c) = key.code {
        if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            state.insert_query_char(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use pretty_assertions::assert_eq;

    fn press(state: &mut AppState<impl Sized>, code: KeyCode) {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), state);
    }

    fn type_str(state: &mut AppState<impl Sized>, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_navigate_and_copy() {
        let mut state = test_state(&["aaa.com", "bbb.com", "mail.aaa.com"]);
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.pending_copy.as_deref(), Some("bbb.com"));
    }

    #[test]
    fn test_gg_sequence_moves_to_top() {
        let mut state = test_state(&["a.com", "b.com", "c.com"]);
        handle_key_event(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT), &mut state);
        assert_eq!(state.cursor_position, 2);

        press(&mut state, KeyCode::Char('g'));
        assert!(state.pending_key.is_some());
        press(&mut state, KeyCode::Char('g'));
        assert_eq!(state.cursor_position, 0);
        assert!(state.pending_key.is_none());
    }

    #[test]
    fn test_search_mode_filters_live() {
        let mut state = test_state(&["aaa.com", "bbb.com", "mail.aaa.com"]);
        press(&mut state, KeyCode::Char('/'));
        assert_eq!(state.mode, Mode::Search);

        type_str(&mut state, "aaa");
        assert_eq!(state.session.visible(), ["aaa.com", "mail.aaa.com"]);

        // navigation keys are typed into the query while searching
        type_str(&mut state, "j");
        assert_eq!(state.session.query(), "aaaj");
        assert_eq!(state.visible_len(), 0);

        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.session.query(), "aaa");

        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('y'));
        assert_eq!(state.pending_copy.as_deref(), Some("mail.aaa.com"));
    }

    #[test]
    fn test_search_escape_clears_query() {
        let mut state = test_state(&["aaa.com", "bbb.com"]);
        press(&mut state, KeyCode::Char('/'));
        type_str(&mut state, "bbb");
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.session.query(), "");
        assert_eq!(state.visible_len(), 2);
    }

    #[test]
    fn test_search_cursor_editing() {
        let mut state = test_state(&["abc.com"]);
        press(&mut state, KeyCode::Char('/'));
        type_str(&mut state, "ac");
        press(&mut state, KeyCode::Left);
        press(&mut state, KeyCode::Char('b'));
        assert_eq!(state.session.query(), "abc");
        press(&mut state, KeyCode::Home);
        press(&mut state, KeyCode::Delete);
        assert_eq!(state.session.query(), "bc");
        press(&mut state, KeyCode::End);
        assert_eq!(state.query_cursor_pos, 2);
    }

    #[test]
    fn test_ctrl_u_clears_query_in_both_modes() {
        let mut state = test_state(&["aaa.com", "bbb.com"]);
        press(&mut state, KeyCode::Char('/'));
        type_str(&mut state, "a");
        handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &mut state);
        assert_eq!(state.session.query(), "");

        type_str(&mut state, "b");
        press(&mut state, KeyCode::Enter);
        handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &mut state);
        assert_eq!(state.session.query(), "");
    }

    #[test]
    fn test_help_and_quit() {
        let mut state = test_state(&["a.com"]);
        press(&mut state, KeyCode::Char('?'));
        assert!(state.show_help);
        press(&mut state, KeyCode::Esc);
        assert!(!state.show_help);
        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn test_copy_with_no_results_does_nothing() {
        let mut state = test_state(&["a.com"]);
        press(&mut state, KeyCode::Char('/'));
        type_str(&mut state, "zzz");
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.pending_copy, None);
    }
}
