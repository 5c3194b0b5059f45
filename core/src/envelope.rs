//! The `{"rajaongkir": {...}}` wrapper shared by every response.
//!
//! # Design
//! One generic `Envelope<T>` covers all endpoints; `T` is the shape of
//! `results` (a single object, a list, or a list of carrier services).
//! Decoding never looks at the status; `check_status` does, and only after
//! it passes are the results handed out.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::error::{ClientError, Result};
use crate::types::City;

/// API-level status embedded in the body. Unrelated to the HTTP status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Status {
    pub code: i64,
    pub description: String,
}

impl Status {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned + Default"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub rajaongkir: Body<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned + Default"))]
pub struct Body<T> {
    /// Echo of the request parameters; not interpreted. List calls send `[]`.
    #[serde(default)]
    pub query: serde_json::Value,
    #[serde(default)]
    pub status: Status,
    /// Only present on cost responses.
    #[serde(default)]
    pub origin_details: Option<City>,
    #[serde(default)]
    pub destination_details: Option<City>,
    #[serde(default)]
    pub results: T,
}

impl<T> Envelope<T> {
    pub fn status(&self) -> &Status {
        &self.rajaongkir.status
    }

    /// Unwrap the body, failing with `ApiError` when the status is not 2xx.
    pub fn into_body(self) -> Result<Body<T>> {
        check_status(&self.rajaongkir.status)?;
        Ok(self.rajaongkir)
    }

    pub fn into_results(self) -> Result<T> {
        self.into_body().map(|body| body.results)
    }
}

/// Parse a response body into an envelope with `results` of shape `T`.
pub fn decode<T>(bytes: &[u8]) -> Result<Envelope<T>>
where
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_slice(bytes)?)
}

pub fn check_status(status: &Status) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    warn!(code = status.code, description = %status.description, "api returned failure status");
    Err(ClientError::ApiError {
        code: status.code,
        description: status.description.clone(),
    })
}
