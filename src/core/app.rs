//! Session state for one interactive shell.
//!
//! [`App`] composes the theme store, input history, transcript, and the
//! streaming and connectivity states. The chat loop owns the only instance and
//! feeds it keystrokes and backend replies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};
use tracing::debug;
use tui_textarea::{CursorMove, TextArea};

use crate::commands::{process_input, CommandResult};
use crate::core::backend::ReplyMessage;
use crate::core::config::Settings;
use crate::core::connectivity::ConnectivityState;
use crate::core::history::InputHistory;
use crate::core::message::{Message, TranscriptRole};
use crate::core::streaming::StreamingState;
use crate::core::theme_store::{Subscription, ThemeStore};
use crate::ui::banner;

const INPUT_TITLE: &str = "Message (Enter to send, /help for commands, Esc to quit)";

/// What the chat loop should do after the user pressed Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, or a prompt refused while another is outstanding.
    Ignored,
    /// A slash-command ran locally.
    Handled,
    /// Send `prompt` to the backend, tagged with `request_id`.
    Prompt { prompt: String, request_id: u64 },
}

pub struct App {
    pub themes: ThemeStore,
    pub banner_theme: String,
    pub history: InputHistory,
    pub streaming: StreamingState,
    pub connectivity: ConnectivityState,
    pub messages: VecDeque<Message>,
    pub status: Option<String>,
    pub textarea: TextArea<'static>,
    pub client: reqwest::Client,
    pub base_url: String,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_offset: u16,
    pending_request: Option<u64>,
    next_request_id: u64,
    restyle: Arc<AtomicBool>,
    theme_subscription: Subscription,
}

impl App {
    pub fn new(settings: &Settings, client: reqwest::Client) -> Self {
        let themes = ThemeStore::builtin(settings.session_env());
        Self::with_store(themes, settings.base_url.clone(), client)
    }

    pub fn with_store(themes: ThemeStore, base_url: String, client: reqwest::Client) -> Self {
        let banner_theme = banner::resolve_name(themes.env().banner_theme().as_deref()).to_string();

        let restyle = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&restyle);
        let theme_subscription = themes.subscribe(move || flag.store(true, Ordering::Release));

        let mut app = App {
            themes,
            banner_theme,
            history: InputHistory::new(),
            streaming: StreamingState::new(),
            connectivity: ConnectivityState::new(),
            messages: VecDeque::new(),
            status: None,
            textarea: TextArea::default(),
            client,
            base_url,
            scroll_offset: 0,
            pending_request: None,
            next_request_id: 0,
            restyle,
            theme_subscription,
        };
        app.configure_textarea();
        app
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.push_message(TranscriptRole::User, content);
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.push_message(TranscriptRole::Assistant, content);
    }

    pub fn add_system_message(&mut self, content: impl Into<String>) {
        self.push_message(TranscriptRole::AppInfo, content);
    }

    pub fn add_error_message(&mut self, content: impl Into<String>) {
        self.push_message(TranscriptRole::AppError, content);
    }

    fn push_message(&mut self, role: TranscriptRole, content: impl Into<String>) {
        self.messages.push_back(Message::new(role, content));
        self.scroll_offset = 0;
    }

    pub fn clear_transcript(&mut self) {
        self.messages.clear();
        self.scroll_offset = 0;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        let lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        self.textarea = TextArea::from(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
        self.configure_textarea();
    }

    pub fn history_up(&mut self) {
        let entry = self.history.navigate_up();
        self.set_input_text(&entry);
    }

    pub fn history_down(&mut self) {
        let entry = self.history.navigate_down();
        self.set_input_text(&entry);
    }

    /// Consume the input line and act on it.
    pub fn submit(&mut self) -> Submission {
        let input = self.input_text();
        if input.trim().is_empty() {
            return Submission::Ignored;
        }

        if crate::commands::parse(&input).is_none() && self.streaming.is_responding() {
            self.set_status("Still waiting for the previous response");
            return Submission::Ignored;
        }

        self.set_input_text("");
        self.history.add(input.clone());

        match process_input(self, &input) {
            CommandResult::Continue => Submission::Handled,
            CommandResult::ProcessAsMessage(prompt) => {
                self.add_user_message(prompt.clone());
                let request_id = self.next_request_id;
                self.next_request_id += 1;
                self.pending_request = Some(request_id);
                self.streaming.begin();
                debug!(request_id, "prompt dispatched");
                Submission::Prompt { prompt, request_id }
            }
        }
    }

    /// Apply a backend reply. Returns `true` when the backend looked
    /// unreachable and connectivity should be re-probed.
    pub fn handle_reply(&mut self, message: ReplyMessage, request_id: u64) -> bool {
        if self.pending_request != Some(request_id) {
            debug!(request_id, "dropping stale reply");
            return false;
        }
        self.pending_request = None;
        self.streaming.finish();

        match message {
            ReplyMessage::Reply(text) => {
                self.connectivity.record(true);
                self.add_assistant_message(text);
                false
            }
            ReplyMessage::Error {
                message,
                unreachable,
            } => {
                self.add_error_message(format!("Backend error: {message}"));
                unreachable
            }
        }
    }

    /// Whether the theme changed since the last call.
    pub fn take_restyle(&self) -> bool {
        self.restyle.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn configure_textarea(&mut self) {
        let theme = self.themes.get_active();
        let textarea_style = theme
            .input_text_style
            .patch(Style::default().bg(theme.background_color));
        self.textarea.set_style(textarea_style);
        self.textarea.set_cursor_style(theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(theme.input_cursor_line_style);
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style)
                .title(Span::styled(INPUT_TITLE, theme.input_title_style)),
        );
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.theme_subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_app;

    fn type_line(app: &mut App, text: &str) {
        app.set_input_text(text);
    }

    #[test]
    fn blank_input_is_ignored_and_not_recorded() {
        let mut app = create_test_app();
        type_line(&mut app, "   ");
        assert_eq!(app.submit(), Submission::Ignored);
        assert!(app.history.is_empty());
    }

    #[test]
    fn chat_input_becomes_prompt_and_starts_responding() {
        let mut app = create_test_app();
        type_line(&mut app, "hello");
        let submission = app.submit();
        assert_eq!(
            submission,
            Submission::Prompt {
                prompt: "hello".into(),
                request_id: 0
            }
        );
        assert!(app.streaming.is_responding());
        assert_eq!(app.input_text(), "");
        assert_eq!(app.history.entries(), ["hello"]);
        assert_eq!(app.messages.back().map(|m| m.role), Some(TranscriptRole::User));
    }

    #[test]
    fn commands_are_recorded_in_history_but_not_sent() {
        let mut app = create_test_app();
        type_line(&mut app, "/theme light");
        assert_eq!(app.submit(), Submission::Handled);
        assert_eq!(app.themes.active_id(), "light");
        assert_eq!(app.history.entries(), ["/theme light"]);
        assert!(!app.streaming.is_responding());
    }

    #[test]
    fn second_prompt_waits_for_reply_but_commands_still_run() {
        let mut app = create_test_app();
        type_line(&mut app, "first");
        app.submit();

        type_line(&mut app, "second");
        assert_eq!(app.submit(), Submission::Ignored);
        assert_eq!(app.input_text(), "second");

        type_line(&mut app, "/clear");
        assert_eq!(app.submit(), Submission::Handled);
    }

    #[test]
    fn reply_finishes_streaming_and_marks_connected() {
        let mut app = create_test_app();
        type_line(&mut app, "hi");
        let Submission::Prompt { request_id, .. } = app.submit() else {
            panic!("expected prompt");
        };

        let reprobe = app.handle_reply(ReplyMessage::Reply("hey".into()), request_id);
        assert!(!reprobe);
        assert!(!app.streaming.is_responding());
        assert!(app.connectivity.is_connected());
        assert_eq!(app.messages.back().unwrap().content, "hey");
    }

    #[test]
    fn transport_error_requests_reprobe() {
        let mut app = create_test_app();
        type_line(&mut app, "hi");
        let Submission::Prompt { request_id, .. } = app.submit() else {
            panic!("expected prompt");
        };

        let reprobe = app.handle_reply(
            ReplyMessage::Error {
                message: "connection refused".into(),
                unreachable: true,
            },
            request_id,
        );
        assert!(reprobe);
        assert!(!app.streaming.is_responding());
        assert_eq!(app.messages.back().unwrap().role, TranscriptRole::AppError);
    }

    #[test]
    fn stale_reply_is_dropped() {
        let mut app = create_test_app();
        type_line(&mut app, "hi");
        app.submit();
        assert!(!app.handle_reply(ReplyMessage::Reply("late".into()), 42));
        assert!(app.streaming.is_responding());
    }

    #[test]
    fn history_keys_replace_input() {
        let mut app = create_test_app();
        for line in ["/help", "/clear"] {
            type_line(&mut app, line);
            app.submit();
        }
        app.history_up();
        assert_eq!(app.input_text(), "/clear");
        app.history_up();
        assert_eq!(app.input_text(), "/help");
        app.history_down();
        app.history_down();
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn theme_change_raises_restyle_flag_once() {
        let app = create_test_app();
        assert!(!app.take_restyle());
        app.themes.set_active_theme("sunset");
        assert!(app.take_restyle());
        assert!(!app.take_restyle());
        app.themes.set_active_theme("no-such-theme");
        assert!(!app.take_restyle());
    }

    #[test]
    fn dropping_app_releases_theme_subscription() {
        let app = create_test_app();
        let store = app.themes.clone();
        assert_eq!(store.subscriber_count(), 1);
        drop(app);
        assert_eq!(store.subscriber_count(), 0);
    }
}
