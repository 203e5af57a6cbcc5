use crate::ui::builtin_themes::ThemeSpec;
use ratatui::style::{Color, Modifier, Style};

/// A named bundle of styles consumed by the renderer.
///
/// Every registered theme is a value of this one struct, so consumers can read
/// any slot without checking which theme is active.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: String,
    pub display_name: String,

    // Overall background color to paint the full frame
    pub background_color: Color,
    // Transcript styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub system_text_style: Style,
    pub error_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub streaming_indicator_style: Style,
    pub connected_style: Style,
    pub disconnected_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub input_cursor_line_style: Style,
}

impl Theme {
    /// Palette-based dark theme used when the bundled table has no `dark` entry.
    pub fn dark_fallback() -> Self {
        Theme {
            id: "dark".to_string(),
            display_name: "Dark".to_string(),
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            system_text_style: Style::default().fg(Color::DarkGray),
            error_text_style: Style::default().fg(Color::LightRed),

            title_style: Style::default().fg(Color::Gray),
            streaming_indicator_style: Style::default().fg(Color::White),
            connected_style: Style::default().fg(Color::Green),
            disconnected_style: Style::default().fg(Color::Red),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_cursor_line_style: Style::default(),
        }
    }

    pub fn from_spec(spec: &ThemeSpec) -> Self {
        let background_color = spec
            .background
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::Black);

        Theme {
            id: spec.id.clone(),
            display_name: spec.display_name.clone(),
            background_color,
            user_prefix_style: parse_style(&spec.user_prefix),
            user_text_style: parse_style(&spec.user_text),
            assistant_text_style: parse_style(&spec.assistant_text),
            system_text_style: parse_style(&spec.system_text),
            error_text_style: parse_style(&spec.error_text),

            title_style: parse_style(&spec.title),
            streaming_indicator_style: parse_style(&spec.streaming_indicator),
            connected_style: parse_style(&spec.connected),
            disconnected_style: parse_style(&spec.disconnected),
            input_border_style: parse_style(&spec.input_border),
            input_title_style: parse_style(&spec.input_title),

            input_text_style: parse_style(&spec.input_text),
            input_cursor_style: parse_modifiers(spec.input_cursor_modifiers.as_deref()),
            input_cursor_line_style: Style::default(),
        }
    }
}

/// Parse a color token: `#rgb`, `#rrggbb`, `rgb(r,g,b)` or a named ANSI color.
pub fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if let Some(c) = parse_hex_color(&lower) {
        return Some(c);
    }
    if let Some(c) = parse_rgb_func(&lower) {
        return Some(c);
    }
    match lower.as_str() {
        "black" => Some(Color::Black),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark-grey" | "darkgray" => Some(Color::DarkGray),
        "red" => Some(Color::Red),
        "light_red" | "light-red" => Some(Color::LightRed),
        "green" => Some(Color::Green),
        "light_green" | "light-green" => Some(Color::LightGreen),
        "blue" => Some(Color::Blue),
        "light_blue" | "light-blue" => Some(Color::LightBlue),
        "cyan" => Some(Color::Cyan),
        "light_cyan" | "light-cyan" => Some(Color::LightCyan),
        "magenta" => Some(Color::Magenta),
        "light_magenta" | "light-magenta" => Some(Color::LightMagenta),
        "yellow" => Some(Color::Yellow),
        "light_yellow" | "light-yellow" => Some(Color::LightYellow),
        "reset" => Some(Color::Reset),
        _ => None,
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#').filter(|h| h.is_ascii())?;
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn parse_rgb_func(s: &str) -> Option<Color> {
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<_> = content
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u16>().ok()?;
    let g = parts[1].parse::<u16>().ok()?;
    let b = parts[2].parse::<u16>().ok()?;
    Some(Color::Rgb(
        r.min(255) as u8,
        g.min(255) as u8,
        b.min(255) as u8,
    ))
}

fn parse_modifier(tok: &str) -> Option<Modifier> {
    match tok.to_ascii_lowercase().as_str() {
        "bold" => Some(Modifier::BOLD),
        "reversed" => Some(Modifier::REVERSED),
        "italic" => Some(Modifier::ITALIC),
        "dim" => Some(Modifier::DIM),
        "underlined" => Some(Modifier::UNDERLINED),
        _ => None,
    }
}

/// A style spec is a comma-separated list of color and modifier tokens; the
/// last color wins and unknown tokens are ignored.
fn parse_style(spec: &Option<String>) -> Style {
    let mut style = Style::default();
    if let Some(spec) = spec {
        for tok in spec.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(color) = parse_color(tok) {
                style = style.fg(color);
            } else if let Some(modifier) = parse_modifier(tok) {
                style = style.add_modifier(modifier);
            }
        }
    }
    style
}

fn parse_modifiers(spec: Option<&str>) -> Style {
    spec.into_iter()
        .flat_map(|s| s.split(','))
        .filter_map(|tok| parse_modifier(tok.trim()))
        .fold(Style::default(), |style, m| style.add_modifier(m))
}
