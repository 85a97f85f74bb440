//! Configuration loading tests
//!
//! `figment::Jail` isolates the working directory and environment of each
//! test.

use figment::Jail;
use vdr_domain::value_objects::MultiVectorComparator;
use vdr_infrastructure::config::{AppConfig, ConfigBuilder, ConfigLoader};
use vdr_infrastructure::config::loader::validate_app_config;

fn load(jail: &Jail) -> figment::error::Result<AppConfig> {
    ConfigLoader::new()
        .with_config_path(jail.directory().join("vdr.toml"))
        .load()
        .map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults_are_valid_and_name_production_providers() {
    let config = AppConfig::default();
    validate_app_config(&config).unwrap();

    assert_eq!(config.pipeline.batch_size, 10);
    assert_eq!(config.pipeline.top_k, 3);
    assert_eq!(config.providers.embedding.provider, "colpali");
    assert_eq!(config.providers.embedding.model, "vidore/colpali-v1.2");
    assert_eq!(config.providers.vector_store.provider, "qdrant");
    assert!(config.providers.vector_store.api_key.is_none());
    assert_eq!(config.resilience.upsert_max_attempts, 3);
    assert_eq!(
        config.collection_defaults.to_policy().multivector,
        Some(MultiVectorComparator::MaxSim)
    );
}

#[test]
fn test_toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "vdr.toml",
            r#"
            [server]
            port = 9100

            [pipeline]
            collection = "textbooks"
            batch_size = 4

            [providers.vector_store]
            provider = "memory"

            [collection_defaults]
            multivector_comparator = "none"

            [collection_defaults.quantization]
            enabled = false
            "#,
        )?;
        let config = load(jail)?;

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.pipeline.collection, "textbooks");
        assert_eq!(config.pipeline.batch_size, 4);
        assert_eq!(config.pipeline.top_k, 3);
        assert_eq!(config.providers.vector_store.provider, "memory");
        let policy = config.collection_defaults.to_policy();
        assert!(policy.quantization.is_none());
        assert!(policy.multivector.is_none());
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file_with_double_underscore_nesting() {
    Jail::expect_with(|jail| {
        jail.create_file("vdr.toml", "[server]\nport = 9100\n")?;
        jail.set_env("VDR_SERVER__PORT", "9200");
        jail.set_env("VDR_PROVIDERS__VECTOR_STORE__API_KEY", "from-env");
        jail.set_env("VDR_PIPELINE__TOP_K", "5");
        let config = load(jail)?;

        assert_eq!(config.server.port, 9200);
        assert_eq!(
            config.providers.vector_store.api_key.as_deref(),
            Some("from-env")
        );
        assert_eq!(config.pipeline.top_k, 5);
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    Jail::expect_with(|jail| {
        let result = ConfigLoader::new()
            .with_config_path(jail.directory().join("absent.toml"))
            .load();
        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn test_validation_rejects_bad_values() {
    Jail::expect_with(|jail| {
        jail.create_file("vdr.toml", "[pipeline]\nbatch_size = 0\n")?;
        assert!(load(jail).is_err());

        jail.create_file("vdr.toml", "[providers.embedding]\nprovider = \"clip\"\n")?;
        let err = load(jail).unwrap_err().to_string();
        assert!(err.contains("clip"), "{err}");

        jail.create_file(
            "vdr.toml",
            "[collection_defaults.quantization]\nquantile = 0.3\n",
        )?;
        assert!(load(jail).is_err());
        Ok(())
    });
}

#[test]
fn test_remote_provider_requires_url() {
    let mut config = AppConfig::default();
    config.providers.vector_store.url = None;
    assert!(validate_app_config(&config).is_err());

    let offline = ConfigBuilder::new().offline().build();
    validate_app_config(&offline).unwrap();
}

#[test]
fn test_retry_policy_follows_resilience_section() {
    let mut config = AppConfig::default();
    config.resilience.upsert_max_attempts = 5;
    assert_eq!(config.resilience.retry_policy().max_attempts, 5);
}
