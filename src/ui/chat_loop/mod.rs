//! Main chat event loop.
//!
//! Draws a frame, applies pending theme and backend updates, then waits briefly
//! for terminal input. Backend work runs on the tokio runtime and reports back
//! over channels so the loop itself never blocks on the network.

mod keybindings;
mod lifecycle;

pub use self::keybindings::{handle_key, KeyLoopAction};
pub use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

use std::{
    error::Error,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::core::app::App;
use crate::core::backend::{build_client, PromptService, ReplyMessage};
use crate::core::config::Settings;
use crate::ui::renderer::ui;
use crate::utils::input::sanitize_paste;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub async fn run_chat(settings: Settings) -> Result<(), Box<dyn Error>> {
    let client = build_client(settings.request_timeout);
    let probe_client = build_client(settings.probe_timeout);
    let mut app = App::new(&settings, client);
    info!(
        base_url = %app.base_url,
        theme = %app.themes.active_id(),
        banner = %app.banner_theme,
        "starting chat session"
    );

    spawn_refresh(&app, &probe_client);

    let (prompts, mut replies) = PromptService::new();

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &prompts, &mut replies, &probe_client).await;
    let restored = restore_terminal(&mut terminal);

    result?;
    restored
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    prompts: &PromptService,
    replies: &mut mpsc::UnboundedReceiver<(ReplyMessage, u64)>,
    probe_client: &reqwest::Client,
) -> Result<(), Box<dyn Error>> {
    let started = Instant::now();

    loop {
        if app.take_restyle() {
            app.configure_textarea();
        }

        terminal.draw(|f| ui(f, app, started.elapsed()))?;

        if drain_replies(app, replies) {
            debug!("backend unreachable, re-probing");
            spawn_refresh(app, probe_client);
        }

        if !event::poll(EVENT_POLL_INTERVAL)? {
            tokio::task::yield_now().await;
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match handle_key(app, key) {
                KeyLoopAction::Quit => return Ok(()),
                KeyLoopAction::SendPrompt { prompt, request_id } => {
                    prompts.spawn_prompt(
                        app.client.clone(),
                        app.base_url.clone(),
                        prompt,
                        request_id,
                    );
                }
                KeyLoopAction::Continue => {}
            },
            Event::Paste(text) => {
                app.textarea.insert_str(sanitize_paste(&text));
            }
            _ => {}
        }
    }
}

/// Apply every queued reply. Returns whether any of them found the backend
/// unreachable, in which case one fresh probe is due.
fn drain_replies(
    app: &mut App,
    replies: &mut mpsc::UnboundedReceiver<(ReplyMessage, u64)>,
) -> bool {
    let mut reprobe = false;
    while let Ok((message, request_id)) = replies.try_recv() {
        reprobe |= app.handle_reply(message, request_id);
    }
    reprobe
}

fn spawn_refresh(app: &App, client: &reqwest::Client) -> JoinHandle<bool> {
    let connectivity = app.connectivity.clone();
    let client = client.clone();
    let base_url = app.base_url.clone();
    tokio::spawn(async move {
        let connected = connectivity.refresh(&client, &base_url).await;
        info!(connected, "connectivity probe finished");
        connected
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::Submission;
    use crate::core::backend::test_server::{closed_port, serve_once};
    use crate::utils::test_utils::create_test_app;

    fn submit_prompt(app: &mut App, text: &str) -> u64 {
        app.set_input_text(text);
        match app.submit() {
            Submission::Prompt { request_id, .. } => request_id,
            other => panic!("expected a prompt, got {other:?}"),
        }
    }

    #[test]
    fn transport_failure_asks_for_a_fresh_probe() {
        let mut app = create_test_app();
        let request_id = submit_prompt(&mut app, "hello");
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send((
            ReplyMessage::Error {
                message: "connection refused".into(),
                unreachable: true,
            },
            request_id,
        ))
        .unwrap();

        assert!(drain_replies(&mut app, &mut rx));
        assert!(!app.streaming.is_responding());
    }

    #[test]
    fn successful_or_rejected_replies_do_not_reprobe() {
        let mut app = create_test_app();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let first = submit_prompt(&mut app, "one");
        tx.send((ReplyMessage::Reply("hi".into()), first)).unwrap();
        assert!(!drain_replies(&mut app, &mut rx));
        assert!(app.connectivity.is_connected());

        let second = submit_prompt(&mut app, "two");
        tx.send((
            ReplyMessage::Error {
                message: "backend returned 500".into(),
                unreachable: false,
            },
            second,
        ))
        .unwrap();
        assert!(!drain_replies(&mut app, &mut rx));
        assert!(!drain_replies(&mut app, &mut rx));
    }

    #[test]
    fn stale_unreachable_reply_does_not_reprobe() {
        let mut app = create_test_app();
        let request_id = submit_prompt(&mut app, "hello");
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send((
            ReplyMessage::Error {
                message: "timed out".into(),
                unreachable: true,
            },
            request_id + 1,
        ))
        .unwrap();

        assert!(!drain_replies(&mut app, &mut rx));
        assert!(app.streaming.is_responding());
    }

    #[tokio::test]
    async fn refresh_marks_reachable_backend_connected() {
        let (base_url, request) = serve_once("200 OK", r#"{"status":"ok"}"#).await;
        let mut app = create_test_app();
        app.base_url = base_url;

        let connected = spawn_refresh(&app, &reqwest::Client::new()).await.unwrap();
        assert!(connected);
        assert!(app.connectivity.is_connected());
        assert!(request.await.unwrap().starts_with("POST /run"));
    }

    #[tokio::test]
    async fn failed_prompt_then_refresh_leaves_session_offline() {
        let mut app = create_test_app();
        app.base_url = closed_port().await;
        app.connectivity.record(true);

        let (prompts, mut replies) = PromptService::new();
        let request_id = submit_prompt(&mut app, "hello");
        prompts.spawn_prompt(
            app.client.clone(),
            app.base_url.clone(),
            "hello".into(),
            request_id,
        );
        let (message, id) = replies.recv().await.expect("reply");
        assert!(app.handle_reply(message, id));

        let connected = spawn_refresh(&app, &reqwest::Client::new()).await.unwrap();
        assert!(!connected);
        assert!(!app.connectivity.is_connected());
    }
}
