//! In-process stand-in for the RajaOngkir starter API.
//!
//! Serves `/province`, `/city` and `/cost` over plain HTTP from a small fixed
//! dataset, wrapping every answer in the `{"rajaongkir": {...}}` envelope.
//! Requests without the expected `key` header get the API's 400 envelope.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Province {
    pub province_id: String,
    pub province: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    pub city_id: String,
    pub province_id: String,
    pub province: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub city_name: String,
    pub postal_code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// All fields optional so a partial form still gets an envelope back rather
/// than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CostForm {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub weight: Option<u32>,
    pub courier: Option<String>,
}

pub struct Dataset {
    pub api_key: String,
    pub provinces: Vec<Province>,
    pub cities: Vec<City>,
}

pub type Db = Arc<Dataset>;

fn province(id: &str, name: &str) -> Province {
    Province {
        province_id: id.to_string(),
        province: name.to_string(),
    }
}

fn city(id: &str, province_id: &str, province: &str, kind: &str, name: &str, postal: &str) -> City {
    City {
        city_id: id.to_string(),
        province_id: province_id.to_string(),
        province: province.to_string(),
        kind: kind.to_string(),
        city_name: name.to_string(),
        postal_code: postal.to_string(),
    }
}

impl Dataset {
    pub fn sample(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            provinces: vec![
                province("1", "Bali"),
                province("5", "DI Yogyakarta"),
                province("12", "Kalimantan Barat"),
                province("13", "Kalimantan Timur"),
            ],
            cities: vec![
                city("39", "5", "DI Yogyakarta", "Kabupaten", "Bantul", "55700"),
                city("114", "1", "Bali", "Kota", "Denpasar", "80000"),
                city("501", "5", "DI Yogyakarta", "Kota", "Yogyakarta", "55000"),
            ],
        }
    }
}

/// Couriers served by the starter plan: (code, name, [(service, description, rate per kg, etd)]).
const COURIERS: &[(&str, &str, &[(&str, &str, u64, &str)])] = &[
    (
        "jne",
        "Jalur Nugraha Ekakurir (JNE)",
        &[
            ("OKE", "Ongkos Kirim Ekonomis", 19000, "4-5"),
            ("REG", "Layanan Reguler", 22000, "2-3"),
            ("YES", "Yakin Esok Sampai", 49000, "1-1"),
        ],
    ),
    (
        "pos",
        "POS Indonesia (POS)",
        &[("Paket Kilat Khusus", "Paket Kilat Khusus", 20500, "4 HARI")],
    ),
    (
        "tiki",
        "Citra Van Titipan Kilat (TIKI)",
        &[("REG", "Regular Service", 21000, "3"), ("ECO", "Economy Service", 17000, "5")],
    ),
];

pub fn app(api_key: &str) -> Router {
    with_dataset(Dataset::sample(api_key))
}

pub fn with_dataset(dataset: Dataset) -> Router {
    let db: Db = Arc::new(dataset);
    Router::new()
        .route("/province", get(get_province))
        .route("/city", get(get_city))
        .route("/cost", post(post_cost))
        .with_state(db)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    serve(listener, app(api_key)).await
}

/// Serve any router; used by tests that need a canned endpoint.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

fn envelope(query: Value, code: u16, description: &str, results: Option<Value>) -> Value {
    let mut body = json!({
        "query": query,
        "status": { "code": code, "description": description },
    });
    if let Some(results) = results {
        body["results"] = results;
    }
    json!({ "rajaongkir": body })
}

fn ok(query: Value, results: Value) -> Response {
    Json(envelope(query, 200, "OK", Some(results))).into_response()
}

fn fail(query: Value, description: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(envelope(query, 400, description, None)),
    )
        .into_response()
}

fn id_echo(query: &IdQuery) -> Value {
    match &query.id {
        Some(id) => json!({ "id": id }),
        None => json!([]),
    }
}

fn authorized(db: &Dataset, headers: &HeaderMap) -> bool {
    headers
        .get("key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == db.api_key)
}

async fn get_province(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> Response {
    let echo = id_echo(&query);
    if !authorized(&db, &headers) {
        return fail(echo, "Invalid key.");
    }
    match query.id {
        None => ok(echo, json!(db.provinces)),
        Some(id) => match db.provinces.iter().find(|p| p.province_id == id) {
            Some(found) => ok(echo, json!(found)),
            None => fail(echo, "Invalid province id."),
        },
    }
}

async fn get_city(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> Response {
    let echo = id_echo(&query);
    if !authorized(&db, &headers) {
        return fail(echo, "Invalid key.");
    }
    match query.id {
        None => ok(echo, json!(db.cities)),
        Some(id) => match db.cities.iter().find(|c| c.city_id == id) {
            Some(found) => ok(echo, json!(found)),
            None => fail(echo, "Invalid city id."),
        },
    }
}

async fn post_cost(State(db): State<Db>, headers: HeaderMap, Form(form): Form<CostForm>) -> Response {
    let echo = json!({
        "origin": form.origin,
        "destination": form.destination,
        "weight": form.weight,
        "courier": form.courier,
    });
    if !authorized(&db, &headers) {
        return fail(echo, "Invalid key.");
    }

    let find_city = |id: &Option<String>| {
        id.as_deref()
            .and_then(|id| db.cities.iter().find(|c| c.city_id == id))
            .cloned()
    };
    let Some(origin) = find_city(&form.origin) else {
        return fail(echo, "Bad request. Origin tidak valid.");
    };
    let Some(destination) = find_city(&form.destination) else {
        return fail(echo, "Bad request. Destination tidak valid.");
    };
    let weight = match form.weight {
        Some(w) if w > 0 => w,
        _ => return fail(echo, "Bad request. Weight harus diisi."),
    };
    let Some(courier) = form.courier.as_deref() else {
        return fail(echo, "Bad request. Courier harus diisi.");
    };

    // Billed per started kilogram.
    let kilos = u64::from(weight).div_ceil(1000);
    let results: Vec<Value> = COURIERS
        .iter()
        .filter(|(code, _, _)| *code == courier)
        .map(|(code, name, services)| {
            let costs: Vec<Value> = services
                .iter()
                .map(|(service, description, rate, etd)| {
                    json!({
                        "service": service,
                        "description": description,
                        "cost": [{ "value": rate * kilos, "etd": etd, "note": "" }],
                    })
                })
                .collect();
            json!({ "code": code, "name": name, "costs": costs })
        })
        .collect();

    let mut response = envelope(echo, 200, "OK", Some(json!(results)));
    response["rajaongkir"]["origin_details"] = json!(origin);
    response["rajaongkir"]["destination_details"] = json!(destination);
    Json(response).into_response()
}
