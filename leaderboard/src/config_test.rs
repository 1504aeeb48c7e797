use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_nothing_set() {
    let config = LeaderboardConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config, LeaderboardConfig::default());
    assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.auth_token, None);
    assert_eq!(config.timeouts.request_secs, 30);
    assert_eq!(config.timeouts.connect_secs, 10);
    assert_eq!(config.entries_max_count, 20);
}

#[test]
fn reads_every_variable() {
    let config = LeaderboardConfig::from_lookup(lookup_from(&[
        ("LEADERBOARD_API_BASE_URL", "http://localhost:4000/play/"),
        ("LEADERBOARD_AUTH_TOKEN", "secret"),
        ("LEADERBOARD_REQUEST_TIMEOUT_SECS", "5"),
        ("LEADERBOARD_CONNECT_TIMEOUT_SECS", " 2 "),
        ("LEADERBOARD_ENTRIES_MAX_COUNT", "50"),
    ]))
    .unwrap();
    assert_eq!(config.base_url, "http://localhost:4000/play");
    assert_eq!(config.auth_token.as_deref(), Some("secret"));
    assert_eq!(config.timeouts, Timeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(config.entries_max_count, 50);
}

#[test]
fn blank_values_fall_back() {
    let config = LeaderboardConfig::from_lookup(lookup_from(&[
        ("LEADERBOARD_API_BASE_URL", "  "),
        ("LEADERBOARD_AUTH_TOKEN", ""),
    ]))
    .unwrap();
    assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.auth_token, None);
}

#[test]
fn invalid_number_is_config_parse_error() {
    let err = LeaderboardConfig::from_lookup(lookup_from(&[("LEADERBOARD_REQUEST_TIMEOUT_SECS", "soon")]))
        .unwrap_err();
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
    assert!(err.to_string().contains("LEADERBOARD_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn with_base_url_trims_trailing_slashes() {
    let config = LeaderboardConfig::default().with_base_url("http://127.0.0.1:9999//");
    assert_eq!(config.base_url, "http://127.0.0.1:9999");
}
