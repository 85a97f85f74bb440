//! Logging configuration tests

use tracing::Level;
use vdr_infrastructure::logging::parse_log_level;

#[test]
fn test_parse_log_level_accepts_known_levels() {
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    let err = parse_log_level("verbose").unwrap_err();
    assert!(err.to_string().contains("verbose"));
}
