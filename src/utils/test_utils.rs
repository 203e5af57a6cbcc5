#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::core::config::SessionEnv;
#[cfg(test)]
use crate::core::theme_store::ThemeStore;

/// App on the built-in themes with no environment input, pointed at an
/// address nothing should be listening on.
#[cfg(test)]
pub fn create_test_app() -> App {
    create_test_app_with_env(SessionEnv::default())
}

#[cfg(test)]
pub fn create_test_app_with_env(env: SessionEnv) -> App {
    App::with_store(
        ThemeStore::builtin(env),
        "http://127.0.0.1:9".to_string(),
        reqwest::Client::new(),
    )
}
