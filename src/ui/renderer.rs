use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::core::app::App;
use crate::core::message::{Message, TranscriptRole};
use crate::ui::banner;
use crate::ui::theme::Theme;

const MAX_INPUT_LINES: u16 = 5;

pub fn ui(f: &mut Frame, app: &App, elapsed: Duration) {
    let theme = app.themes.get_active();
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let input_lines = (app.textarea.lines().len() as u16).clamp(1, MAX_INPUT_LINES);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner::banner_height() + 1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(input_lines + 2), // +2 for borders
        ])
        .split(area);

    let banner_widget = Paragraph::new(banner::banner_lines(banner::resolve(&app.banner_theme)))
        .alignment(Alignment::Center);
    f.render_widget(banner_widget, chunks[0]);

    render_transcript(f, app, &theme, chunks[1]);
    f.render_widget(
        Paragraph::new(status_line(app, &theme, elapsed)),
        chunks[2],
    );
    f.render_widget(&app.textarea, chunks[3]);
}

fn render_transcript(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let lines = prewrap_lines(&build_display_lines(&app.messages, theme), area.width);
    let visible = visible_window(lines, area.height, app.scroll_offset);
    f.render_widget(Paragraph::new(visible), area);
}

/// The `height` lines ending `scroll_offset` lines above the bottom. The
/// offset is clamped so the window never runs past the oldest line.
pub fn visible_window(
    lines: Vec<Line<'static>>,
    height: u16,
    scroll_offset: u16,
) -> Vec<Line<'static>> {
    let height = height as usize;
    let max_offset = lines.len().saturating_sub(height);
    let start = max_offset - (scroll_offset as usize).min(max_offset);
    lines.into_iter().skip(start).take(height).collect()
}

/// Styled transcript lines, one blank line after each message.
pub fn build_display_lines(
    messages: &std::collections::VecDeque<Message>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for msg in messages {
        match msg.role {
            TranscriptRole::User => {
                let mut content_lines = msg.content.lines();
                let first = content_lines.next().unwrap_or("").to_string();
                lines.push(Line::from(vec![
                    Span::styled("You: ", theme.user_prefix_style),
                    Span::styled(first, theme.user_text_style),
                ]));
                for rest in content_lines {
                    lines.push(Line::from(Span::styled(
                        format!("     {rest}"),
                        theme.user_text_style,
                    )));
                }
            }
            role => {
                let style = match role {
                    TranscriptRole::Assistant => theme.assistant_text_style,
                    TranscriptRole::AppError => theme.error_text_style,
                    _ => theme.system_text_style,
                };
                for content_line in msg.content.lines() {
                    lines.push(Line::from(Span::styled(content_line.to_string(), style)));
                }
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Break lines at `width` display columns so the line count matches what the
/// terminal shows.
pub fn prewrap_lines(lines: &[Line<'static>], width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    if width == 0 {
        return lines.to_vec();
    }

    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let mut current: Vec<Span<'static>> = Vec::new();
        let mut used = 0usize;
        for span in &line.spans {
            let mut chunk = String::new();
            for ch in span.content.chars() {
                let w = ch.width().unwrap_or(0);
                if used + w > width && used > 0 {
                    if !chunk.is_empty() {
                        current.push(Span::styled(std::mem::take(&mut chunk), span.style));
                    }
                    out.push(Line::from(std::mem::take(&mut current)));
                    used = 0;
                }
                chunk.push(ch);
                used += w;
            }
            if !chunk.is_empty() {
                current.push(Span::styled(chunk, span.style));
            }
        }
        out.push(Line::from(current));
    }
    out
}

fn pulse_symbol(elapsed: Duration) -> &'static str {
    let phase = (elapsed.as_millis() % 1000) as f32 / 1000.0;
    let intensity = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

pub fn status_line(app: &App, theme: &Theme, elapsed: Duration) -> Line<'static> {
    let mut spans = Vec::new();
    if app.connectivity.is_connected() {
        spans.push(Span::styled("● connected", theme.connected_style));
    } else {
        spans.push(Span::styled("○ offline", theme.disconnected_style));
    }

    if app.streaming.is_responding() {
        spans.push(Span::styled(
            format!("  {} responding", pulse_symbol(elapsed)),
            theme.streaming_indicator_style,
        ));
    }

    spans.push(Span::styled(
        format!("  theme: {}", app.themes.active_id()),
        theme.title_style,
    ));

    if let Some(status) = &app.status {
        spans.push(Span::styled(format!("  • {status}"), theme.system_text_style));
    }

    Line::from(spans)
}
