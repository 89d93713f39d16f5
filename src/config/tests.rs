use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, env-mutating tests are serialised.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, env-mutating tests are serialised.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_sommelier_env() {
    let vars: Vec<String> = env::vars()
        .map(|(k, _)| k)
        .filter(|k| k.starts_with("SOMMELIER_"))
        .collect();
    // SAFETY: Test code only, env-mutating tests are serialised.
    for key in vars {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.qdrant_url, "http://localhost:6334");
    assert_eq!(config.collection, "wine_catalog");
    assert!(config.redis_url.is_none());
    assert_eq!(config.top_k, 10);
    assert_eq!(config.embedding_timeout, Duration::from_secs(10));
    assert_eq!(config.reference_partition, "producers");
    assert!(!config.menu_pairing);
    assert_eq!(config.price.budget_ceiling, 50.0);
    assert_eq!(config.price.premium_floor, 100.0);
    assert_eq!(config.price.luxury_floor, 200.0);
}

#[test]
fn test_default_config_validates() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_socket_addr() {
    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_sommelier_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.chat_model, "grok-3");
    assert_eq!(config.cache_ttl, Duration::from_secs(2_592_000));
}

#[test]
#[serial]
fn test_from_env_custom_values() {
    clear_sommelier_env();

    with_env_vars(
        &[
            ("SOMMELIER_PORT", "3000"),
            ("SOMMELIER_QDRANT_URL", "http://qdrant:6334"),
            ("SOMMELIER_REDIS_URL", "redis://cache:6379/0"),
            ("SOMMELIER_TOP_K", "15"),
            ("SOMMELIER_LLM_TIMEOUT_MS", "2500"),
            ("SOMMELIER_MENU_PAIRING", "true"),
            ("SOMMELIER_APPROX_TOLERANCE", "0.25"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.port, 3000);
            assert_eq!(config.qdrant_url, "http://qdrant:6334");
            assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379/0"));
            assert_eq!(config.top_k, 15);
            assert_eq!(config.llm_timeout, Duration::from_millis(2500));
            assert!(config.menu_pairing);
            assert_eq!(config.price.approx_tolerance, 0.25);
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_redis_url_is_none() {
    clear_sommelier_env();

    with_env_vars(&[("SOMMELIER_REDIS_URL", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.redis_url.is_none());
    });
}

#[test]
#[serial]
fn test_from_env_invalid_port() {
    clear_sommelier_env();

    with_env_vars(&[("SOMMELIER_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    });

    with_env_vars(&[("SOMMELIER_PORT", "eighty")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_sommelier_env();

    with_env_vars(&[("SOMMELIER_TOP_K", "ten")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                name: "SOMMELIER_TOP_K",
                ..
            }
        ));
    });
}

#[test]
#[serial]
fn test_from_env_menu_pairing_falsey() {
    clear_sommelier_env();

    with_env_vars(&[("SOMMELIER_MENU_PAIRING", "no")], || {
        let config = Config::from_env().expect("should parse");
        assert!(!config.menu_pairing);
    });
}

#[test]
fn test_validate_rejects_small_top_k() {
    let config = Config {
        top_k: 1,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { .. })
    ));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let config = Config {
        cache_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange {
            name: "SOMMELIER_CACHE_TIMEOUT_MS",
            ..
        })
    ));
}

#[test]
fn test_validate_rejects_tolerance_out_of_range() {
    let mut config = Config::default();
    config.price.approx_tolerance = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { .. })
    ));
}

#[test]
fn test_validate_rejects_unordered_thresholds() {
    let mut config = Config::default();
    config.price.premium_floor = 40.0;
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPriceThresholds { .. }));
    assert!(err.to_string().contains("40"));
}

#[test]
fn test_validate_rejects_empty_collection() {
    let config = Config {
        collection: " ".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyValue { .. })
    ));
}
