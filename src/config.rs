//! Service configuration from the environment (`.env` is honoured).

use std::env;

use crate::{ChatCommerceError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ChatCommerceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(ChatCommerceError::Config { message: format!("unknown LOG_FORMAT `{other}`") }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub currency: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8083, currency: "INR".to_string(), log_format: LogFormat::Compact }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ChatCommerceError::Config {
                message: format!("PORT must be a port number, got `{raw}`"),
            })?,
            None => defaults.port,
        };
        let currency = match lookup("ORDER_CURRENCY") {
            Some(raw) if raw.trim().len() == 3 => raw.trim().to_uppercase(),
            Some(raw) => return Err(ChatCommerceError::Config {
                message: format!("ORDER_CURRENCY must be a 3-letter code, got `{raw}`"),
            }),
            None => defaults.currency,
        };
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };
        Ok(Self { port, currency, log_format })
    }
}
