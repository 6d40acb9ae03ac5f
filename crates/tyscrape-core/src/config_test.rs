use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "TYSCRAPE_ENV"));
}

#[test]
fn build_app_config_defaults_match_reference_deployment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.listing_url, DEFAULT_LISTING_URL);
    assert_eq!(cfg.page_param, "pi");
    assert_eq!(cfg.link_origin, DEFAULT_LINK_ORIGIN);
    assert_eq!(cfg.first_page, 1);
    assert_eq!(cfg.end_page, 168);
    assert_eq!(
        cfg.output_path,
        PathBuf::from("./trendyol_mobile_phones.csv")
    );
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert_eq!(cfg.schedule, "0 0 3 * * *");
    assert_eq!(cfg.job_retries, 1);
    assert_eq!(cfg.job_retry_delay_secs, 300);
}

#[test]
fn page_range_uses_configured_bounds() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_FIRST_PAGE", "3");
    map.insert("TYSCRAPE_END_PAGE", "6");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let pages: Vec<u32> = cfg.page_range().unwrap().into_iter().collect();
    assert_eq!(pages, vec![3, 4, 5]);
}

#[test]
fn build_app_config_rejects_page_zero() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_FIRST_PAGE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidPageRange { first: 0, .. })),
        "expected InvalidPageRange, got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_inverted_range() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_FIRST_PAGE", "10");
    map.insert("TYSCRAPE_END_PAGE", "2");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_rejects_non_numeric_end_page() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_END_PAGE", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TYSCRAPE_END_PAGE"),
        "expected InvalidEnvVar(TYSCRAPE_END_PAGE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TYSCRAPE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TYSCRAPE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_output_path() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_OUTPUT_PATH", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TYSCRAPE_OUTPUT_PATH"),
        "expected InvalidEnvVar(TYSCRAPE_OUTPUT_PATH), got: {result:?}"
    );
}

#[test]
fn link_origin_trailing_slash_is_stripped() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_LINK_ORIGIN", "https://shop.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.link_origin, "https://shop.example.com");
}

#[test]
fn overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("TYSCRAPE_ENV", "production");
    map.insert("TYSCRAPE_OUTPUT_PATH", "/var/data/phones.csv");
    map.insert("TYSCRAPE_MAX_RETRIES", "0");
    map.insert("TYSCRAPE_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.output_path, PathBuf::from("/var/data/phones.csv"));
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
