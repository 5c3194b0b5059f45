//! Synchronous client for the RajaOngkir starter API.
//!
//! # Design
//! Each operation is split the same way: a `build_*` method produces an
//! `HttpRequest`, a `parse_*` method turns response bytes into typed results,
//! and the public `get_*` method runs one through the `Transport` into the
//! other. `build_*` and `parse_*` never touch the network.

use std::fmt;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::envelope::decode;
use crate::error::{ClientError, Result};
use crate::http::{default_agent, HttpMethod, HttpRequest, Transport, DEFAULT_TIMEOUT};
use crate::types::{CarrierService, City, Cost, CostQuery, CostQuote, Province};

pub const PROVINCE_ENDPOINT: &str = "/province";
pub const CITY_ENDPOINT: &str = "/city";
pub const COST_ENDPOINT: &str = "/cost";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Compose the request URL. The path is appended verbatim, query string
/// included.
pub fn build_url(base_host: &str, endpoint: &str) -> String {
    format!("https://{base_host}{endpoint}")
}

/// Client for the province, city and cost endpoints.
///
/// Cloning is cheap and clones share the transport.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    base_host: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_host", &self.base_host)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client. Without a transport, a ureq agent with a 10 second
    /// timeout is used.
    pub fn new(api_key: &str, base_host: &str, transport: Option<Arc<dyn Transport>>) -> Self {
        let transport =
            transport.unwrap_or_else(|| Arc::new(default_agent(DEFAULT_TIMEOUT)) as Arc<dyn Transport>);
        Self {
            api_key: api_key.to_string(),
            base_host: base_host.to_string(),
            transport,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_host: config.base_host.clone(),
            transport: Arc::new(default_agent(config.timeout)),
        }
    }

    /// Replace the transport, keeping credentials.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    // -----------------------------------------------------------------------
    // Request building
    // -----------------------------------------------------------------------

    /// Build an authenticated request. An empty payload means no body.
    pub fn build_request(&self, method: &str, endpoint: &str, payload: &str) -> Result<HttpRequest> {
        let method: HttpMethod = method.parse()?;
        Ok(HttpRequest {
            method,
            url: build_url(&self.base_host, endpoint),
            headers: vec![
                ("key".to_string(), self.api_key.clone()),
                ("content-type".to_string(), FORM_CONTENT_TYPE.to_string()),
            ],
            body: (!payload.is_empty()).then(|| payload.to_string()),
        })
    }

    pub fn build_get_provinces(&self) -> Result<HttpRequest> {
        self.build_request("GET", PROVINCE_ENDPOINT, "")
    }

    pub fn build_get_province(&self, id: &str) -> Result<HttpRequest> {
        self.build_request("GET", &format!("{PROVINCE_ENDPOINT}?id={id}"), "")
    }

    pub fn build_get_cities(&self) -> Result<HttpRequest> {
        self.build_request("GET", CITY_ENDPOINT, "")
    }

    pub fn build_get_city(&self, id: &str) -> Result<HttpRequest> {
        self.build_request("GET", &format!("{CITY_ENDPOINT}?id={id}"), "")
    }

    pub fn build_get_cost(&self, query: &CostQuery) -> Result<HttpRequest> {
        self.build_request("POST", COST_ENDPOINT, &query.to_form())
    }

    // -----------------------------------------------------------------------
    // Response parsing
    // -----------------------------------------------------------------------

    pub fn parse_get_provinces(&self, body: &[u8]) -> Result<Vec<Province>> {
        decode::<Vec<Province>>(body)?.into_results()
    }

    pub fn parse_get_province(&self, body: &[u8]) -> Result<Province> {
        decode::<Province>(body)?.into_results()
    }

    pub fn parse_get_cities(&self, body: &[u8]) -> Result<Vec<City>> {
        decode::<Vec<City>>(body)?.into_results()
    }

    pub fn parse_get_city(&self, body: &[u8]) -> Result<City> {
        decode::<City>(body)?.into_results()
    }

    /// The API answers one courier per request, so only the first carrier
    /// entry is kept.
    pub fn parse_get_cost(&self, body: &[u8]) -> Result<CostQuote> {
        let body = decode::<Vec<CarrierService>>(body)?.into_body()?;
        let carrier = body
            .results
            .into_iter()
            .next()
            .ok_or(ClientError::EmptyResultError)?;
        Ok(CostQuote {
            origin: body.origin_details.unwrap_or_default(),
            destination: body.destination_details.unwrap_or_default(),
            carrier,
        })
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    fn execute(&self, request: HttpRequest) -> Result<Vec<u8>> {
        Ok(self.transport.send(&request)?.body)
    }

    pub fn get_provinces(&self) -> Result<Vec<Province>> {
        let body = self.execute(self.build_get_provinces()?)?;
        self.parse_get_provinces(&body)
    }

    pub fn get_province(&self, id: &str) -> Result<Province> {
        let body = self.execute(self.build_get_province(id)?)?;
        self.parse_get_province(&body)
    }

    pub fn get_cities(&self) -> Result<Vec<City>> {
        let body = self.execute(self.build_get_cities()?)?;
        self.parse_get_cities(&body)
    }

    pub fn get_city(&self, id: &str) -> Result<City> {
        let body = self.execute(self.build_get_city(id)?)?;
        self.parse_get_city(&body)
    }

    /// Look up shipping costs. `weight` is in grams.
    pub fn get_cost_quote(
        &self,
        origin: &str,
        destination: &str,
        weight: u32,
        courier: &str,
    ) -> Result<CostQuote> {
        let query = CostQuery::new(origin, destination, weight, courier);
        let body = self.execute(self.build_get_cost(&query)?)?;
        self.parse_get_cost(&body)
    }

    pub fn get_cost(
        &self,
        origin: &str,
        destination: &str,
        weight: u32,
        courier: &str,
    ) -> Result<Vec<Cost>> {
        self.get_cost_quote(origin, destination, weight, courier)
            .map(|quote| quote.carrier.costs)
    }
}
