use std::fmt::Write as _;

use crate::core::config::Settings;
use crate::core::theme_store::ThemeStore;
use crate::ui::banner;

pub fn list_themes(settings: &Settings) {
    let store = ThemeStore::builtin(settings.session_env());
    let banner_theme = banner::resolve_name(settings.banner_theme.as_deref());
    print!("{}", format_theme_list(&store, banner_theme));
}

/// Registered themes and banner palettes, the active ones marked with `*`.
pub fn format_theme_list(store: &ThemeStore, banner_theme: &str) -> String {
    let active = store.active_id();
    let mut out = String::from("Themes:\n");
    for (id, theme) in store.registry().iter() {
        let mark = if id == active { "*" } else { " " };
        let _ = writeln!(out, "  {mark} {id} - {}", theme.display_name);
    }

    out.push_str("\nBanner palettes:\n");
    for name in banner::palette_names() {
        let mark = if name == banner_theme { "*" } else { " " };
        let _ = writeln!(out, "  {mark} {name}");
    }

    let _ = writeln!(out, "\nCurrent: {active} (banner: {banner_theme})");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{EnvValues, SessionEnv};

    fn store_with(theme: Option<&str>) -> ThemeStore {
        ThemeStore::builtin(SessionEnv::new(EnvValues {
            theme: theme.map(str::to_string),
            banner_theme: None,
        }))
    }

    #[test]
    fn marks_the_active_theme_and_palette() {
        let listing = format_theme_list(&store_with(Some("dracula")), "ocean");
        assert!(listing.contains("  * dracula - Dracula"), "{listing}");
        assert!(listing.contains("    dark - Dark"), "{listing}");
        assert!(listing.contains("  * ocean"), "{listing}");
        assert!(listing.contains("    electric"), "{listing}");
        assert!(listing.ends_with("Current: dracula (banner: ocean)\n"));
    }

    #[test]
    fn unknown_requested_theme_lists_default_as_active() {
        let listing = format_theme_list(&store_with(Some("neon")), banner::DEFAULT_PALETTE);
        assert!(listing.contains("  * dark - Dark"), "{listing}");
        assert!(!listing.contains("neon"));
    }

    #[test]
    fn themes_appear_in_registration_order() {
        let listing = format_theme_list(&store_with(None), "electric");
        let positions: Vec<usize> = ["dark -", "light -", "sunset -", "dracula -"]
            .iter()
            .map(|id| listing.find(id).expect(id))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{listing}");
    }
}
