//! Key handling for the chat shell.
//!
//! Keys are resolved against the [`App`] synchronously; anything that needs the
//! runtime (sending a prompt) is handed back to the loop as a [`KeyLoopAction`].

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, Submission};

const PAGE_SCROLL_LINES: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLoopAction {
    Continue,
    Quit,
    SendPrompt { prompt: String, request_id: u64 },
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyLoopAction {
    if is_quit_key(&key) {
        return KeyLoopAction::Quit;
    }

    match key.code {
        KeyCode::Enter => match app.submit() {
            Submission::Prompt { prompt, request_id } => {
                KeyLoopAction::SendPrompt { prompt, request_id }
            }
            Submission::Handled | Submission::Ignored => KeyLoopAction::Continue,
        },
        KeyCode::Up => {
            app.history_up();
            KeyLoopAction::Continue
        }
        KeyCode::Down => {
            app.history_down();
            KeyLoopAction::Continue
        }
        KeyCode::PageUp => {
            app.scroll_up(PAGE_SCROLL_LINES);
            KeyLoopAction::Continue
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE_SCROLL_LINES);
            KeyLoopAction::Continue
        }
        _ => {
            app.textarea.input(TAInput::from(key));
            KeyLoopAction::Continue
        }
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
