use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pricing: PricingRules,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingRules {
    /// The single product id whose price this system overrides.
    #[serde(default = "default_target_product")]
    pub target_product_id: i64,
    #[serde(default = "default_floor")]
    pub floor_price: f64,
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Custom-field name holding the asking price on a listing record.
    #[serde(default = "default_asking_field")]
    pub asking_price_field: String,
}

fn default_target_product() -> i64 {
    773
}

fn default_floor() -> f64 {
    99.0
}

fn default_rate() -> f64 {
    0.05
}

fn default_asking_field() -> String {
    "asking_price".to_string()
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            target_product_id: default_target_product(),
            floor_price: default_floor(),
            rate: default_rate(),
            asking_price_field: default_asking_field(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Session key holding the active listing pointer.
    #[serde(default = "default_session_key")]
    pub active_listing_key: String,
}

fn default_session_key() -> String {
    "active_listing".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            active_listing_key: default_session_key(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Optional configuration files; every field has a default
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `TORI__PRICING__RATE=0.07` overrides the rate
            .add_source(config::Environment::with_prefix("TORI").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
