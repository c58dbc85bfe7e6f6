//! Key and mouse dispatch for relnav.
//!
//! Translates raw crossterm events into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. Quit and
//! release-navigation keys are handled first; every other key falls through
//! to the viewport scrolling handler unmodified.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::AppState;
use crate::theme::Theme;

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly (exit code 0).
    Quit,
}

/// Dispatches a key event.
///
/// `q` / `Esc` / `Ctrl+C` quit; `←` / `h` focus the previous release;
/// `→` / `l` focus the next. Navigation keys are harmless no-ops while the
/// fetch is still outstanding — the navigation model does not exist yet.
pub fn handle_key(key: KeyEvent, state: &mut AppState, theme: &Theme) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,

        KeyCode::Left | KeyCode::Char('h') => {
            state.focus_prev(theme);
            return KeyAction::Continue;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.focus_next(theme);
            return KeyAction::Continue;
        }
        _ => {}
    }

    handle_scroll_key(key, state);
    KeyAction::Continue
}

/// Viewport scrolling: `j`/`k`/arrows, `g`/`G`, page keys, and the vim-ish
/// Ctrl combos. Unknown keys are ignored.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => state.scroll_top(),
        KeyCode::Char('G') | KeyCode::End => state.scroll_bottom(),
        KeyCode::PageDown => state.full_page_down(),
        KeyCode::PageUp => state.full_page_up(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        _ => {}
    }
}

/// Mouse wheel scrolls the viewport by 3 lines, matching typical terminal
/// scroll speed. Other mouse events are ignored.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll_up(3),
        MouseEventKind::ScrollDown => state.scroll_down(3),
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnav_core::{parse_version, Release};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(
            "alice".to_owned(),
            "hello".to_owned(),
            parse_version("0.0.0").unwrap(),
        );
        state
            .apply_fetch(
                vec![
                    Release { tag: "0.1.0".to_owned(), description: "old".to_owned() },
                    Release { tag: "1.0.0".to_owned(), description: "new".to_owned() },
                ],
                &Theme::dark(),
            )
            .unwrap();
        state
    }

    #[test]
    fn quit_keys_quit() {
        let theme = Theme::dark();
        let mut state = loaded_state();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state, &theme), KeyAction::Quit);
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state, &theme), KeyAction::Quit);
        assert_eq!(handle_key(ctrl_key('c'), &mut state, &theme), KeyAction::Quit);
    }

    #[test]
    fn arrow_and_vim_keys_move_focus() {
        let theme = Theme::dark();
        let mut state = loaded_state();
        assert_eq!(state.nav.as_ref().unwrap().focused().tag, "0.1.0");

        handle_key(key(KeyCode::Char('l')), &mut state, &theme);
        assert_eq!(state.nav.as_ref().unwrap().focused().tag, "1.0.0");

        handle_key(key(KeyCode::Left), &mut state, &theme);
        assert_eq!(state.nav.as_ref().unwrap().focused().tag, "0.1.0");

        // At the lower bound, previous is a no-op, not a wrap.
        handle_key(key(KeyCode::Char('h')), &mut state, &theme);
        assert_eq!(state.nav.as_ref().unwrap().focused().tag, "0.1.0");
    }

    #[test]
    fn navigation_keys_are_noops_before_load() {
        let theme = Theme::dark();
        let mut state = AppState::new(
            "alice".to_owned(),
            "hello".to_owned(),
            parse_version("0.0.0").unwrap(),
        );
        assert_eq!(handle_key(key(KeyCode::Right), &mut state, &theme), KeyAction::Continue);
        assert!(state.nav.is_none());
    }

    #[test]
    fn other_keys_fall_through_to_the_viewport() {
        let theme = Theme::dark();
        let mut state = loaded_state();
        state.body_lines = 50;
        state.viewport_height = 10;

        handle_key(key(KeyCode::Char('j')), &mut state, &theme);
        assert_eq!(state.scroll, 1);
        handle_key(key(KeyCode::Char('G')), &mut state, &theme);
        assert_eq!(state.scroll, state.max_scroll());
        handle_key(key(KeyCode::Char('k')), &mut state, &theme);
        assert_eq!(state.scroll, state.max_scroll() - 1);
    }

    #[test]
    fn mouse_wheel_scrolls_by_three() {
        let mut state = loaded_state();
        state.body_lines = 50;
        state.viewport_height = 10;

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(wheel, &mut state);
        assert_eq!(state.scroll, 3);
    }
}
