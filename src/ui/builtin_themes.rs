use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeSpec {
    pub id: String,
    pub display_name: String,
    pub background: Option<String>,
    pub user_prefix: Option<String>,
    pub user_text: Option<String>,
    pub assistant_text: Option<String>,
    pub system_text: Option<String>,
    pub error_text: Option<String>,
    pub title: Option<String>,
    pub streaming_indicator: Option<String>,
    pub connected: Option<String>,
    pub disconnected: Option<String>,
    pub input_border: Option<String>,
    pub input_title: Option<String>,
    pub input_text: Option<String>,
    pub input_cursor_modifiers: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuiltinThemesConfig {
    themes: Vec<ThemeSpec>,
}

const CONFIG_CONTENT: &str = include_str!("../builtin_themes.toml");

/// Themes bundled with the binary, in table order.
pub fn load_builtin_themes() -> Vec<ThemeSpec> {
    match toml::from_str::<BuiltinThemesConfig>(CONFIG_CONTENT) {
        Ok(config) => config.themes,
        Err(err) => {
            tracing::error!(error = %err, "bundled theme table failed to parse");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_has_expected_builtins_in_order() {
        let ids: Vec<String> = load_builtin_themes().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["dark", "light", "sunset", "dracula"]);
    }

    #[test]
    fn every_builtin_fills_every_slot() {
        for t in load_builtin_themes() {
            assert!(t.background.is_some(), "{} background", t.id);
            assert!(t.user_prefix.is_some(), "{} user_prefix", t.id);
            assert!(t.assistant_text.is_some(), "{} assistant_text", t.id);
            assert!(t.error_text.is_some(), "{} error_text", t.id);
            assert!(t.connected.is_some(), "{} connected", t.id);
            assert!(t.disconnected.is_some(), "{} disconnected", t.id);
            assert!(t.input_border.is_some(), "{} input_border", t.id);
        }
    }
}
