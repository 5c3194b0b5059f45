//! Synchronous client for the RajaOngkir shipping-rate API.
//!
//! # Overview
//! Looks up provinces, cities and courier shipping costs. Every response is
//! wrapped in a `{"rajaongkir": {...}}` envelope whose embedded status code,
//! not the HTTP status, decides success.
//!
//! # Design
//! - `Client` holds the API key, base host and a shared `Transport`.
//! - Each operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes response bytes); `get_*` runs both over the
//!   transport.
//! - One generic `Envelope<T>` is decoded per call and its status checked
//!   before results are returned.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod types;

pub use client::{build_url, Client};
pub use config::ClientConfig;
pub use envelope::{check_status, decode, Envelope, Status};
pub use error::{ClientError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{CarrierService, City, Cost, CostQuery, CostQuote, CostValue, Province};
