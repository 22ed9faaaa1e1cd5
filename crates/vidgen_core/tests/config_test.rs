//! Tests for configuration loading.

use std::collections::HashMap;
use std::time::Duration;
use vidgen_core::{DEFAULT_BASE_URL, DEFAULT_MODEL, VidgenConfig};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_from_lookup_defaults() {
    let config = VidgenConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k-123")])).unwrap();

    assert_eq!(config.api_key(), "k-123");
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.model(), DEFAULT_MODEL);
    assert_eq!(config.poll_interval(), Duration::from_secs(10));
    assert_eq!(*config.max_poll_attempts(), None);
    assert_eq!(config.max_poll_wait(), Some(Duration::from_secs(1200)));
    assert_eq!(config.request_timeout(), Duration::from_secs(60));
}

#[test]
fn test_from_lookup_overrides() {
    let config = VidgenConfig::from_lookup(lookup_from(&[
        ("GEMINI_API_KEY", "k"),
        ("VIDGEN_BASE_URL", "http://localhost:9999"),
        ("VIDGEN_MODEL", "veo-3.0-generate-preview"),
        ("VIDGEN_DATA_DIR", "/tmp/vidgen-test"),
        ("VIDGEN_POLL_INTERVAL_SECS", "2"),
        ("VIDGEN_MAX_POLL_ATTEMPTS", "7"),
    ]))
    .unwrap();

    assert_eq!(config.base_url(), "http://localhost:9999");
    assert_eq!(config.model(), "veo-3.0-generate-preview");
    assert_eq!(config.data_dir().to_str(), Some("/tmp/vidgen-test"));
    assert_eq!(*config.poll_interval_secs(), 2);
    assert_eq!(*config.max_poll_attempts(), Some(7));
}

#[test]
fn test_missing_api_key_is_error() {
    let err = VidgenConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(err.message.contains("GEMINI_API_KEY"));

    assert!(VidgenConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).is_err());
}

#[test]
fn test_bad_number_is_error() {
    let err = VidgenConfig::from_lookup(lookup_from(&[
        ("GEMINI_API_KEY", "k"),
        ("VIDGEN_POLL_INTERVAL_SECS", "soon"),
    ]))
    .unwrap_err();
    assert!(err.message.contains("VIDGEN_POLL_INTERVAL_SECS"));
}

#[test]
fn test_toml_key_from_environment() {
    let toml = r#"
        model = "veo-2.0-generate-001"
        poll_interval_secs = 5
        max_poll_attempts = 12
    "#;

    let config =
        VidgenConfig::from_toml_str(toml, lookup_from(&[("GEMINI_API_KEY", "from-env")])).unwrap();
    assert_eq!(config.api_key(), "from-env");
    assert_eq!(*config.poll_interval_secs(), 5);
    assert_eq!(*config.max_poll_attempts(), Some(12));
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);

    assert!(VidgenConfig::from_toml_str(toml, lookup_from(&[])).is_err());
}

#[test]
fn test_debug_redacts_key() {
    let config = VidgenConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "super-secret")])).unwrap();
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_poll_policy_from_config() {
    let config = VidgenConfig::from_lookup(lookup_from(&[
        ("GEMINI_API_KEY", "k"),
        ("VIDGEN_POLL_INTERVAL_SECS", "3"),
        ("VIDGEN_MAX_POLL_ATTEMPTS", "4"),
    ]))
    .unwrap();

    let policy = config.poll_policy();
    assert_eq!(*policy.interval(), Duration::from_secs(3));
    assert_eq!(*policy.max_attempts(), Some(4));
    assert_eq!(*policy.max_wait(), Some(Duration::from_secs(1200)));
    assert!(policy.exhausted(5, Duration::from_secs(12)));
    assert!(policy.exhausted(2, Duration::from_secs(1201)));
    assert!(!policy.exhausted(4, Duration::from_secs(1200)));
}
