//! Client configuration.
//!
//! Deserializable from any serde format so callers can keep it alongside the
//! rest of their settings. Nothing here reads the environment.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::http::DEFAULT_TIMEOUT;

pub const DEFAULT_BASE_HOST: &str = "api.rajaongkir.com/starter";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: String,
    /// Host plus path prefix, without scheme.
    pub base_host: String,
    #[serde(rename = "timeout_secs", deserialize_with = "duration_from_secs")]
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_host: DEFAULT_BASE_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_host", &self.base_host)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
