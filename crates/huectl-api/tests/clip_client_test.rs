#![allow(clippy::unwrap_used)]
// Integration tests for `ClipClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huectl_api::transport::TransportConfig;
use huectl_api::{ClipClient, Credentials, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ClipClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ClipClient::new(
        base_url,
        &Credentials::new("test-key"),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn light_json(id: &str, name: &str, on: bool) -> serde_json::Value {
    json!({
        "id": id,
        "id_v1": format!("/lights/{id}"),
        "type": "light",
        "owner": { "rid": "0b6f", "rtype": "device" },
        "metadata": { "name": name, "archetype": "sultan_bulb" },
        "on": { "on": on },
        "dimming": { "brightness": 63.5, "min_dim_level": 0.2 },
        "color_temperature": { "mirek": 366, "mirek_valid": true },
        "color": {
            "xy": { "x": 0.4573, "y": 0.41 },
            "gamut": {
                "red": { "x": 0.6915, "y": 0.3083 },
                "green": { "x": 0.17, "y": 0.7 },
                "blue": { "x": 0.1532, "y": 0.0475 }
            },
            "gamut_type": "C"
        }
    })
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_lights_sends_key_and_keeps_order() {
    let (server, client) = setup().await;

    let body = json!({
        "errors": [],
        "data": [
            light_json("3", "Kitchen", true),
            light_json("1", "Hallway", false),
        ]
    });

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .and(header("hue-application-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let lights = client.list_lights().await.unwrap();

    assert_eq!(lights.len(), 2);
    assert_eq!(lights[0].id, "3");
    assert_eq!(lights[0].metadata.name, "Kitchen");
    assert!(lights[0].on.on);
    assert_eq!(lights[1].id, "1");
    assert!(!lights[1].on.on);

    let color = lights[0].color.as_ref().unwrap();
    assert!((color.xy.x - 0.4573).abs() < f64::EPSILON);
    assert_eq!(color.gamut_type.as_deref(), Some("C"));
    assert_eq!(lights[0].color_temperature.unwrap().mirek, Some(366));
    assert_eq!(lights[0].id_v1.as_deref(), Some("/lights/3"));
}

#[tokio::test]
async fn test_list_lights_tolerates_envelope_errors() {
    let (server, client) = setup().await;

    let body = json!({
        "errors": [{ "description": "device 7 unreachable" }],
        "data": [light_json("3", "Kitchen", true)]
    });

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let lights = client.list_lights().await.unwrap();
    assert_eq!(lights.len(), 1);
}

#[tokio::test]
async fn test_list_lights_tolerates_non_object_envelope_errors() {
    let (server, client) = setup().await;

    let body = json!({
        "errors": ["bridge busy", 42, null],
        "data": [light_json("3", "Kitchen", true)]
    });

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let lights = client.list_lights().await.unwrap();
    assert_eq!(lights.len(), 1);
    assert_eq!(lights[0].metadata.name, "Kitchen");
}

#[tokio::test]
async fn test_list_lights_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.list_lights().await;
    assert!(
        matches!(result, Err(Error::Status { status: 500, ref body }) if body == "boom"),
        "expected Status error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_lights_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.list_lights().await;
    assert!(matches!(result, Err(Error::Unauthorized { status: 403 })));
}

#[tokio::test]
async fn test_list_lights_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.list_lights().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_lights_malformed_body_with_multibyte_text() {
    let (server, client) = setup().await;

    // The 200th character is a two-byte one.
    let body = format!("{}é and more", "x".repeat(199));
    Mock::given(method("GET"))
        .and(path("/clip/v2/resource/light"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let result = client.list_lights().await;
    assert!(
        matches!(result, Err(Error::Deserialization { body: ref raw, .. }) if *raw == body),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Power control ───────────────────────────────────────────────────

#[tokio::test]
async fn test_set_light_on_sends_exact_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/5"))
        .and(header("hue-application-key", "test-key"))
        .and(body_string(r#"{"on":{"on":true}}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [],
            "data": [{ "rid": "5", "rtype": "light" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_light_on("5", true).await.unwrap();
}

#[tokio::test]
async fn test_set_light_off_sends_false() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/5"))
        .and(body_string(r#"{"on":{"on":false}}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "errors": [], "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_light_on("5", false).await.unwrap();
}

#[tokio::test]
async fn test_set_light_on_service_unavailable() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/5"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.set_light_on("5", true).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(matches!(err, Error::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_set_light_on_requires_200() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/clip/v2/resource/light/5"))
        .respond_with(ResponseTemplate::new(207))
        .mount(&server)
        .await;

    let err = client.set_light_on("5", true).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 207, .. }));
}
