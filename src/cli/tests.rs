use super::*;
use std::fs;
use tempfile::TempDir;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["parley"]);
    assert_eq!(args.command, None);
    assert_eq!(args.command.unwrap_or(Commands::Chat), Commands::Chat);
}

#[test]
fn subcommands_parse() {
    assert_eq!(parse_args(&["parley", "chat"]).command, Some(Commands::Chat));
    assert_eq!(parse_args(&["parley", "themes"]).command, Some(Commands::Themes));
    assert_eq!(parse_args(&["parley", "ping"]).command, Some(Commands::Ping));
    assert!(Args::try_parse_from(["parley", "bogus"]).is_err());
}

#[test]
fn global_flags_work_before_and_after_subcommand() {
    let before = parse_args(&["parley", "--theme", "light", "ping"]);
    let after = parse_args(&["parley", "ping", "--theme", "light"]);
    assert_eq!(before.theme.as_deref(), Some("light"));
    assert_eq!(after.theme.as_deref(), Some("light"));
}

#[test]
fn flags_become_overrides() {
    let args = parse_args(&[
        "parley",
        "-t",
        "sunset",
        "--banner-theme",
        "ocean",
        "-u",
        "http://agent:9000",
        "--log-file",
        "/tmp/parley.log",
    ]);
    let overrides = args.overrides();
    assert_eq!(overrides.theme.as_deref(), Some("sunset"));
    assert_eq!(overrides.banner_theme.as_deref(), Some("ocean"));
    assert_eq!(overrides.base_url.as_deref(), Some("http://agent:9000"));
    assert_eq!(
        overrides.log_file.as_deref(),
        Some(std::path::Path::new("/tmp/parley.log"))
    );
}

#[test]
fn explicit_config_path_is_loaded() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "theme = \"dracula\"\nbase_url = \"http://file:1\"\n").expect("write");

    let args = parse_args(&["parley", "--config", path.to_str().expect("utf8 path")]);
    let config = args.load_config().expect("config");
    assert_eq!(config.theme.as_deref(), Some("dracula"));

    let settings = Settings::resolve(&args.overrides(), &config, |_| None);
    assert_eq!(settings.base_url, "http://file:1");
    assert_eq!(settings.theme.as_deref(), Some("dracula"));
}

#[test]
fn malformed_explicit_config_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "theme = [").expect("write");

    let args = parse_args(&["parley", "-c", path.to_str().expect("utf8 path")]);
    assert!(args.load_config().is_err());
}
