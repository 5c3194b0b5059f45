//! Domain DTOs for the RajaOngkir starter API.
//!
//! Every field defaults to its zero value when absent from the JSON, so a
//! sparse but well-formed response never fails to decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Province {
    #[serde(rename = "province_id")]
    pub id: String,
    #[serde(rename = "province")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(rename = "city_id")]
    pub id: String,
    pub province_id: String,
    #[serde(rename = "province")]
    pub province_name: String,
    /// "Kota" or "Kabupaten".
    #[serde(rename = "type")]
    pub city_type: String,
    pub city_name: String,
    pub postal_code: String,
}

/// One carrier's service tiers for a shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierService {
    pub code: String,
    pub name: String,
    pub costs: Vec<Cost>,
}

/// A named service tier (e.g. "REG") and its quoted prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    pub service: String,
    pub description: String,
    pub cost: Vec<CostValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostValue {
    /// Price in the smallest currency unit (rupiah).
    pub value: u64,
    /// Estimated delivery time in days, e.g. "2-3". May be empty.
    pub etd: String,
    pub note: String,
}

/// Full result of a cost lookup for a single courier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostQuote {
    pub origin: City,
    pub destination: City,
    pub carrier: CarrierService,
}

/// Parameters of a cost lookup, rendered as a form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostQuery {
    /// Origin city id.
    pub origin: String,
    /// Destination city id.
    pub destination: String,
    /// Weight in grams.
    pub weight: u32,
    /// Courier code: "jne", "pos" or "tiki" on the starter plan.
    pub courier: String,
}

impl CostQuery {
    pub fn new(origin: &str, destination: &str, weight: u32, courier: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            weight,
            courier: courier.to_string(),
        }
    }

    /// Values are inserted verbatim; callers pass plain ids and courier codes.
    pub fn to_form(&self) -> String {
        format!(
            "origin={}&destination={}&weight={}&courier={}",
            self.origin, self.destination, self.weight, self.courier
        )
    }
}
