//! Start-up banner and its color palettes.
//!
//! [`resolve`] maps a palette name to its color stops. Lookups are exact and
//! case-sensitive; anything unknown gets the [`DEFAULT_PALETTE`] stops.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

pub const DEFAULT_PALETTE: &str = "electric";

const PALETTES: &[(&str, &[Color])] = &[
    (
        "electric",
        &[
            Color::Rgb(0x00, 0xe5, 0xff),
            Color::Rgb(0x7c, 0x4d, 0xff),
            Color::Rgb(0xff, 0x2e, 0xc4),
        ],
    ),
    (
        "sunset",
        &[
            Color::Rgb(0xff, 0x7e, 0x5f),
            Color::Rgb(0xfe, 0xb4, 0x7b),
            Color::Rgb(0xff, 0xd2, 0x6f),
        ],
    ),
    (
        "ocean",
        &[
            Color::Rgb(0x00, 0x52, 0xd4),
            Color::Rgb(0x43, 0x64, 0xf7),
            Color::Rgb(0x6f, 0xb1, 0xfc),
        ],
    ),
    (
        "forest",
        &[
            Color::Rgb(0x13, 0x4e, 0x5e),
            Color::Rgb(0x3a, 0x8f, 0x5c),
            Color::Rgb(0x71, 0xb2, 0x80),
        ],
    ),
    (
        "candy",
        &[
            Color::Rgb(0xff, 0x9a, 0x9e),
            Color::Rgb(0xfa, 0xd0, 0xc4),
            Color::Rgb(0xa1, 0x8c, 0xd1),
        ],
    ),
    (
        "mono",
        &[Color::Rgb(0xf0, 0xf0, 0xf0), Color::Rgb(0x80, 0x80, 0x80)],
    ),
];

const BANNER_ART: &[&str] = &[
    "┏━┓┏━┓┏━┓╻  ┏━╸╻ ╻",
    "┣━┛┣━┫┣┳┛┃  ┣╸ ┗┳┛",
    "╹  ╹ ╹╹┗╸┗━╸┗━╸ ╹ ",
];

/// Color stops for the palette called `name`, or the default palette's.
pub fn resolve(name: &str) -> &'static [Color] {
    lookup(name).unwrap_or_else(default_palette)
}

/// Canonical palette name for an optional request, after fallback.
pub fn resolve_name(name: Option<&str>) -> &'static str {
    name.and_then(|n| PALETTES.iter().find(|(id, _)| *id == n))
        .map(|(id, _)| *id)
        .unwrap_or(DEFAULT_PALETTE)
}

pub fn palette_names() -> impl Iterator<Item = &'static str> {
    PALETTES.iter().map(|(id, _)| *id)
}

fn lookup(name: &str) -> Option<&'static [Color]> {
    PALETTES
        .iter()
        .find(|(id, _)| *id == name)
        .map(|(_, colors)| *colors)
}

fn default_palette() -> &'static [Color] {
    PALETTES[0].1
}

pub fn banner_height() -> u16 {
    BANNER_ART.len() as u16
}

/// The banner art painted with a left-to-right gradient over `palette`.
pub fn banner_lines(palette: &[Color]) -> Vec<Line<'static>> {
    let width = BANNER_ART
        .iter()
        .map(|row| display_width(row))
        .max()
        .unwrap_or(0);

    BANNER_ART
        .iter()
        .map(|row| {
            let mut column = 0usize;
            let spans: Vec<Span<'static>> = row
                .chars()
                .map(|ch| {
                    let t = if width > 1 {
                        column as f32 / (width - 1) as f32
                    } else {
                        0.0
                    };
                    column += ch.width().unwrap_or(0);
                    Span::styled(
                        ch.to_string(),
                        Style::default()
                            .fg(gradient_color(palette, t))
                            .add_modifier(Modifier::BOLD),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Color at position `t` in `[0, 1]` along the stops. RGB neighbours are
/// interpolated; anything else snaps to the nearer stop.
pub fn gradient_color(palette: &[Color], t: f32) -> Color {
    match palette {
        [] => Color::Reset,
        [only] => *only,
        stops => {
            let t = t.clamp(0.0, 1.0);
            let scaled = t * (stops.len() - 1) as f32;
            let index = (scaled.floor() as usize).min(stops.len() - 2);
            let frac = scaled - index as f32;
            match (stops[index], stops[index + 1]) {
                (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => Color::Rgb(
                    lerp(r1, r2, frac),
                    lerp(g1, g2, frac),
                    lerp(b1, b2, frac),
                ),
                (a, b) => {
                    if frac < 0.5 {
                        a
                    } else {
                        b
                    }
                }
            }
        }
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_resolves_to_electric() {
        assert_eq!(resolve("unknownTheme"), resolve("electric"));
        assert_eq!(resolve(""), resolve(DEFAULT_PALETTE));
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(resolve("ocean")[0], Color::Rgb(0x00, 0x52, 0xd4));
        assert_eq!(resolve("Ocean"), resolve("electric"));
        assert_eq!(resolve("ocean "), resolve("electric"));
    }

    #[test]
    fn every_palette_is_non_empty() {
        for name in palette_names() {
            assert!(!resolve(name).is_empty(), "{name}");
        }
    }

    #[test]
    fn resolve_name_falls_back() {
        assert_eq!(resolve_name(Some("candy")), "candy");
        assert_eq!(resolve_name(Some("CANDY")), DEFAULT_PALETTE);
        assert_eq!(resolve_name(None), DEFAULT_PALETTE);
    }

    #[test]
    fn gradient_hits_the_end_stops() {
        let palette = resolve("mono");
        assert_eq!(gradient_color(palette, 0.0), Color::Rgb(0xf0, 0xf0, 0xf0));
        assert_eq!(gradient_color(palette, 1.0), Color::Rgb(0x80, 0x80, 0x80));
        assert_eq!(gradient_color(palette, 0.5), Color::Rgb(0xb8, 0xb8, 0xb8));
        assert_eq!(gradient_color(palette, 7.0), Color::Rgb(0x80, 0x80, 0x80));
    }

    #[test]
    fn gradient_snaps_between_named_colors() {
        let palette = [Color::Red, Color::Blue];
        assert_eq!(gradient_color(&palette, 0.2), Color::Red);
        assert_eq!(gradient_color(&palette, 0.8), Color::Blue);
        assert_eq!(gradient_color(&[], 0.3), Color::Reset);
    }

    #[test]
    fn banner_lines_paint_every_cell() {
        let lines = banner_lines(resolve("sunset"));
        assert_eq!(lines.len(), banner_height() as usize);
        let first = &lines[0];
        assert_eq!(first.spans.first().and_then(|s| s.style.fg), Some(resolve("sunset")[0]));
        assert_eq!(first.spans.last().and_then(|s| s.style.fg), Some(resolve("sunset")[2]));
    }
}
