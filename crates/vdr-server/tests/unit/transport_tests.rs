//! Transport configuration

use std::path::PathBuf;

use vdr_infrastructure::config::ServerConfig;
use vdr_server::HttpTransportConfig;

#[test]
fn test_config_from_server_section() {
    let server = ServerConfig {
        host: "0.0.0.0".to_string(),
        port: 9000,
        enable_cors: false,
        max_upload_mb: 2,
        staging_dir: PathBuf::from("staging"),
    };

    let config = HttpTransportConfig::from(&server);
    assert_eq!(config.port, 9000);
    assert!(!config.enable_cors);
    assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
}

#[test]
fn test_upload_limits_follow_config() {
    let config = HttpTransportConfig {
        max_upload_bytes: 4096,
        ..HttpTransportConfig::localhost(8123)
    };

    let limits = config.limits();
    assert_eq!(limits.get("file").map(|l| l.as_u64()), Some(4096));
    assert_eq!(limits.get("data-form").map(|l| l.as_u64()), Some(4096));
}

#[test]
fn test_invalid_host_falls_back_to_loopback() {
    let config = HttpTransportConfig {
        host: "not a host".to_string(),
        ..HttpTransportConfig::localhost(8123)
    };
    assert!(config.socket_addr().ip().is_loopback());
}
