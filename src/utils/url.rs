//! Joining the configured backend address with endpoint paths.

/// Strip trailing slashes so endpoint paths can be appended with one `/`.
///
/// ```
/// use parley::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://127.0.0.1:8000/"), "http://127.0.0.1:8000");
/// assert_eq!(normalize_base_url("http://host/agent///"), "http://host/agent");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Full URL for `endpoint` under `base_url`, with exactly one slash between
/// them.
///
/// ```
/// use parley::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:8000/", "/run"),
///     "http://127.0.0.1:8000/run"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalize_base_url(base_url), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes_and_whitespace() {
        assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
        assert_eq!(normalize_base_url(" http://localhost:8000/ "), "http://localhost:8000");
        assert_eq!(normalize_base_url("http://h/a/b//"), "http://h/a/b");
        assert_eq!(normalize_base_url("///"), "");
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn construct_joins_with_a_single_slash() {
        for (base, endpoint) in [
            ("http://localhost:8000", "run"),
            ("http://localhost:8000/", "run"),
            ("http://localhost:8000", "/run"),
            ("http://localhost:8000//", "//run"),
        ] {
            assert_eq!(
                construct_api_url(base, endpoint),
                "http://localhost:8000/run",
                "base={base:?} endpoint={endpoint:?}"
            );
        }
    }

    #[test]
    fn construct_keeps_base_path_prefix() {
        assert_eq!(
            construct_api_url("https://agents.example.com/team-a/", "run"),
            "https://agents.example.com/team-a/run"
        );
    }
}
