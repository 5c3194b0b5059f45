//! End-to-end tests against the mock server over real HTTP.
//!
//! # Design
//! The client always targets `https://`, while the mock server speaks plain
//! HTTP. `Plaintext` wraps the default ureq transport and downgrades the
//! scheme, so everything else (headers, body, decoding) runs unmodified.

use std::future::Future;
use std::io::{BufRead, BufReader, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use ongkir_core::http::{default_agent, DEFAULT_TIMEOUT};
use ongkir_core::{Client, ClientError, HttpRequest, HttpResponse, Province, Transport};

const KEY: &str = "APIKEY12345";

struct Plaintext(ureq::Agent);

impl Transport for Plaintext {
    fn send(&self, request: &HttpRequest) -> ongkir_core::Result<HttpResponse> {
        let mut request = request.clone();
        request.url = request.url.replacen("https://", "http://", 1);
        self.0.send(&request)
    }
}

/// Bind a random port and run `serve` on it in a background runtime.
fn spawn_with<F, Fut>(serve: F) -> SocketAddr
where
    F: FnOnce(tokio::net::TcpListener) -> Fut + Send + 'static,
    Fut: Future<Output = std::io::Result<()>>,
{
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            serve(listener).await
        })
        .unwrap();
    });

    addr
}

/// Start the mock API with the sample dataset.
fn spawn_mock() -> SocketAddr {
    spawn_with(|listener| mock_server::run(listener, KEY))
}

/// Start a one-off `router`.
fn spawn(router: Router) -> SocketAddr {
    spawn_with(move |listener| mock_server::serve(listener, router))
}

fn client_for(addr: SocketAddr, key: &str) -> Client {
    let transport: Arc<dyn Transport> = Arc::new(Plaintext(default_agent(DEFAULT_TIMEOUT)));
    Client::new(key, &addr.to_string(), Some(transport))
}

#[test]
fn canned_province_response_decodes() {
    let router = Router::new().route(
        "/province",
        get(|| async {
            r#"{"rajaongkir":{"status":{"code":200,"description":"OK"},"results":{"province_id":"12","province":"Kalimantan Barat"}}}"#
        }),
    );
    let client = client_for(spawn(router), KEY);

    let province = client.get_province("12").unwrap();
    assert_eq!(
        province,
        Province {
            id: "12".to_string(),
            name: "Kalimantan Barat".to_string()
        }
    );
}

#[test]
fn lookup_lifecycle() {
    let client = client_for(spawn_mock(), KEY);

    // Step 1: provinces.
    let provinces = client.get_provinces().unwrap();
    assert_eq!(provinces.len(), 4);
    assert!(provinces.iter().any(|p| p.name == "Bali"));

    // Step 2: single province; the id must travel in the query string.
    let province = client.get_province("13").unwrap();
    assert_eq!(province.name, "Kalimantan Timur");

    // Step 3: cities.
    let cities = client.get_cities().unwrap();
    assert_eq!(cities.len(), 3);

    // Step 4: single city.
    let city = client.get_city("114").unwrap();
    assert_eq!(city.city_name, "Denpasar");
    assert_eq!(city.city_type, "Kota");
    assert_eq!(city.province_name, "Bali");

    // Step 5: cost; the form body must reach the server intact.
    let costs = client.get_cost("501", "114", 1700, "jne").unwrap();
    let services: Vec<&str> = costs.iter().map(|c| c.service.as_str()).collect();
    assert_eq!(services, ["OKE", "REG", "YES"]);
    assert_eq!(costs[1].cost[0].value, 44000);

    // Step 6: full quote.
    let quote = client.get_cost_quote("39", "501", 500, "tiki").unwrap();
    assert_eq!(quote.origin.city_name, "Bantul");
    assert_eq!(quote.destination.city_name, "Yogyakarta");
    assert_eq!(quote.carrier.name, "Citra Van Titipan Kilat (TIKI)");
    assert_eq!(quote.carrier.costs[0].cost[0].value, 21000);
}

#[test]
fn unknown_courier_is_empty_result() {
    let client = client_for(spawn_mock(), KEY);

    let err = client.get_cost("501", "114", 1000, "dhl").unwrap_err();
    assert!(matches!(err, ClientError::EmptyResultError));
}

#[test]
fn wrong_key_surfaces_api_error() {
    let client = client_for(spawn_mock(), "wrong");

    for err in [
        client.get_provinces().unwrap_err(),
        client.get_cities().unwrap_err(),
        client.get_cost("501", "114", 1000, "jne").unwrap_err(),
    ] {
        assert!(matches!(err, ClientError::ApiError { code: 400, .. }));
        assert_eq!(err.to_string(), "Invalid key.");
    }
}

#[test]
fn unknown_id_surfaces_api_error() {
    let client = client_for(spawn_mock(), KEY);

    let err = client.get_city("9999").unwrap_err();
    assert_eq!(err.to_string(), "Invalid city id.");
}

#[test]
fn closed_port_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(addr, KEY);

    let err = client.get_provinces().unwrap_err();
    assert!(matches!(err, ClientError::TransportError(_)));
}

#[test]
fn truncated_body_is_read_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    // Promise 100 bytes, send a few, then hang up.
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = stream;
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"rajaongkir\":")
            .unwrap();
        stream.flush().unwrap();
    });

    let err = client_for(addr, KEY).get_provinces().unwrap_err();
    assert!(matches!(err, ClientError::ReadError(_)), "got {err:?}");
}

#[test]
fn client_is_shareable_across_threads() {
    let client = client_for(spawn_mock(), KEY);

    let handles: Vec<_> = ["1", "5", "12"]
        .into_iter()
        .map(|id| {
            let client = client.clone();
            std::thread::spawn(move || client.get_province(id).unwrap())
        })
        .collect();
    let names: Vec<String> = handles.into_iter().map(|h| h.join().unwrap().name).collect();
    assert_eq!(names, ["Bali", "DI Yogyakarta", "Kalimantan Barat"]);
}
