//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SOMMELIER_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ARBITER_MAX_CANDIDATES, DEFAULT_CACHE_TIMEOUT, DEFAULT_CACHE_TTL,
    DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_TIMEOUT, DEFAULT_INDEX_TIMEOUT, DEFAULT_LLM_TIMEOUT,
    DEFAULT_MEMORY_CACHE_CAPACITY, DEFAULT_MIN_NOTE_LEN, DEFAULT_REFERENCE_PARTITION,
    DEFAULT_TOP_K,
};
use crate::constraint::PriceThresholds;

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SOMMELIER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Qdrant endpoint URL. `mock:` selects the in-memory index (requires `mock`).
    pub qdrant_url: String,

    /// Collection holding every partition's catalog points.
    pub collection: String,

    /// Redis URL for the durable cache. `None` keeps the cache in-process.
    pub redis_url: Option<String>,

    /// Base URL of the OpenAI-compatible embedding API (`mock:` for the stub).
    pub embedding_url: String,

    /// Bearer token for the embedding API.
    pub embedding_api_key: Option<String>,

    /// Embedding model name.
    pub embedding_model: String,

    /// Embedding dimension requested and enforced.
    pub embedding_dim: usize,

    /// Chat model used for arbitration and text generation (`mock` for the stub).
    pub chat_model: String,

    /// Candidates requested from the index. Default: `10`.
    pub top_k: u64,

    /// Candidates enumerated in the arbiter prompt. Default: `10`.
    pub arbiter_max_candidates: usize,

    pub embedding_timeout: Duration,
    pub index_timeout: Duration,
    pub llm_timeout: Duration,
    pub cache_timeout: Duration,

    /// Lifetime of generated text in the cache. Default: 30 days.
    pub cache_ttl: Duration,

    /// Max entries in the in-process cache. Default: `10_000`.
    pub memory_cache_capacity: u64,

    /// Partition searched for producer reference notes. Default: `producers`.
    pub reference_partition: String,

    /// Resolve pairings against the `<partition>_menu` partition first.
    pub menu_pairing: bool,

    /// Minimum length for descriptive text to count as substantive.
    pub min_note_len: usize,

    /// Price parsing heuristics (tolerance band and bucket thresholds).
    pub price: PriceThresholds,
}

/// Default Qdrant URL used when `SOMMELIER_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default collection used when `SOMMELIER_COLLECTION` is not set.
pub const DEFAULT_COLLECTION: &str = "wine_catalog";

/// Default embedding API base.
pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

pub const DEFAULT_CHAT_MODEL: &str = "grok-3";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            redis_url: None,
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            top_k: DEFAULT_TOP_K,
            arbiter_max_candidates: DEFAULT_ARBITER_MAX_CANDIDATES,
            embedding_timeout: DEFAULT_EMBEDDING_TIMEOUT,
            index_timeout: DEFAULT_INDEX_TIMEOUT,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            memory_cache_capacity: DEFAULT_MEMORY_CACHE_CAPACITY,
            reference_partition: DEFAULT_REFERENCE_PARTITION.to_string(),
            menu_pairing: false,
            min_note_len: DEFAULT_MIN_NOTE_LEN,
            price: PriceThresholds::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SOMMELIER_PORT";
    const ENV_BIND_ADDR: &'static str = "SOMMELIER_BIND_ADDR";
    const ENV_QDRANT_URL: &'static str = "SOMMELIER_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "SOMMELIER_COLLECTION";
    const ENV_REDIS_URL: &'static str = "SOMMELIER_REDIS_URL";
    const ENV_EMBEDDING_URL: &'static str = "SOMMELIER_EMBEDDING_URL";
    const ENV_EMBEDDING_API_KEY: &'static str = "SOMMELIER_EMBEDDING_API_KEY";
    const ENV_EMBEDDING_MODEL: &'static str = "SOMMELIER_EMBEDDING_MODEL";
    const ENV_EMBEDDING_DIM: &'static str = "SOMMELIER_EMBEDDING_DIM";
    const ENV_CHAT_MODEL: &'static str = "SOMMELIER_CHAT_MODEL";
    const ENV_TOP_K: &'static str = "SOMMELIER_TOP_K";
    const ENV_EMBEDDING_TIMEOUT_MS: &'static str = "SOMMELIER_EMBEDDING_TIMEOUT_MS";
    const ENV_INDEX_TIMEOUT_MS: &'static str = "SOMMELIER_INDEX_TIMEOUT_MS";
    const ENV_LLM_TIMEOUT_MS: &'static str = "SOMMELIER_LLM_TIMEOUT_MS";
    const ENV_CACHE_TIMEOUT_MS: &'static str = "SOMMELIER_CACHE_TIMEOUT_MS";
    const ENV_CACHE_TTL_SECS: &'static str = "SOMMELIER_CACHE_TTL_SECS";
    const ENV_REFERENCE_PARTITION: &'static str = "SOMMELIER_REFERENCE_PARTITION";
    const ENV_MENU_PAIRING: &'static str = "SOMMELIER_MENU_PAIRING";
    const ENV_APPROX_TOLERANCE: &'static str = "SOMMELIER_APPROX_TOLERANCE";
    const ENV_BUDGET_CEILING: &'static str = "SOMMELIER_BUDGET_CEILING";
    const ENV_PREMIUM_FLOOR: &'static str = "SOMMELIER_PREMIUM_FLOOR";
    const ENV_LUXURY_FLOOR: &'static str = "SOMMELIER_LUXURY_FLOOR";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection = Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection);
        let redis_url = Self::parse_optional_string_from_env(Self::ENV_REDIS_URL);
        let embedding_url =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, defaults.embedding_url);
        let embedding_api_key = Self::parse_optional_string_from_env(Self::ENV_EMBEDDING_API_KEY);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_dim =
            Self::parse_number_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;
        let chat_model = Self::parse_string_from_env(Self::ENV_CHAT_MODEL, defaults.chat_model);
        let top_k = Self::parse_number_from_env(Self::ENV_TOP_K, defaults.top_k)?;

        let embedding_timeout =
            Self::parse_millis_from_env(Self::ENV_EMBEDDING_TIMEOUT_MS, defaults.embedding_timeout)?;
        let index_timeout =
            Self::parse_millis_from_env(Self::ENV_INDEX_TIMEOUT_MS, defaults.index_timeout)?;
        let llm_timeout =
            Self::parse_millis_from_env(Self::ENV_LLM_TIMEOUT_MS, defaults.llm_timeout)?;
        let cache_timeout =
            Self::parse_millis_from_env(Self::ENV_CACHE_TIMEOUT_MS, defaults.cache_timeout)?;
        let cache_ttl = Duration::from_secs(Self::parse_number_from_env(
            Self::ENV_CACHE_TTL_SECS,
            defaults.cache_ttl.as_secs(),
        )?);

        let reference_partition = Self::parse_string_from_env(
            Self::ENV_REFERENCE_PARTITION,
            defaults.reference_partition,
        );
        let menu_pairing = Self::parse_bool_from_env(Self::ENV_MENU_PAIRING, defaults.menu_pairing);

        let price = PriceThresholds {
            approx_tolerance: Self::parse_number_from_env(
                Self::ENV_APPROX_TOLERANCE,
                defaults.price.approx_tolerance,
            )?,
            budget_ceiling: Self::parse_number_from_env(
                Self::ENV_BUDGET_CEILING,
                defaults.price.budget_ceiling,
            )?,
            premium_floor: Self::parse_number_from_env(
                Self::ENV_PREMIUM_FLOOR,
                defaults.price.premium_floor,
            )?,
            luxury_floor: Self::parse_number_from_env(
                Self::ENV_LUXURY_FLOOR,
                defaults.price.luxury_floor,
            )?,
        };

        Ok(Self {
            port,
            bind_addr,
            qdrant_url,
            collection,
            redis_url,
            embedding_url,
            embedding_api_key,
            embedding_model,
            embedding_dim,
            chat_model,
            top_k,
            embedding_timeout,
            index_timeout,
            llm_timeout,
            cache_timeout,
            cache_ttl,
            reference_partition,
            menu_pairing,
            price,
            ..defaults
        })
    }

    /// Validates numeric ranges and cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_COLLECTION,
            });
        }

        if self.reference_partition.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_REFERENCE_PARTITION,
            });
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_EMBEDDING_DIM,
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.top_k < 2 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_TOP_K,
                reason: format!("{} is below the minimum of 2", self.top_k),
            });
        }

        for (name, timeout) in [
            (Self::ENV_EMBEDDING_TIMEOUT_MS, self.embedding_timeout),
            (Self::ENV_INDEX_TIMEOUT_MS, self.index_timeout),
            (Self::ENV_LLM_TIMEOUT_MS, self.llm_timeout),
            (Self::ENV_CACHE_TIMEOUT_MS, self.cache_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::OutOfRange {
                    name,
                    reason: "timeouts must be greater than zero".to_string(),
                });
            }
        }

        let tolerance = self.price.approx_tolerance;
        if !(0.0..1.0).contains(&tolerance) {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_APPROX_TOLERANCE,
                reason: format!("{tolerance} is not within [0, 1)"),
            });
        }

        let PriceThresholds {
            budget_ceiling,
            premium_floor,
            luxury_floor,
            ..
        } = self.price;
        if !(budget_ceiling < premium_floor && premium_floor < luxury_floor) {
            return Err(ConfigError::InvalidPriceThresholds {
                budget: budget_ceiling,
                premium: premium_floor,
                luxury: luxury_floor,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_number_from_env<T: std::str::FromStr>(
        var_name: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_millis_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
        Self::parse_number_from_env(var_name, default_ms).map(Duration::from_millis)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name) {
            Ok(value) => matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            Err(_) => default,
        }
    }
}
