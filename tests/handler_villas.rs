mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::RecordingSender;

#[tokio::test]
async fn test_list_villas() {
    let server = common::create_test_server(RecordingSender::new());

    let response = server.get("/api/villas").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["total"], 3);
    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Villa Aurora", "Villa Olivia", "Villa Marea"]);
}

#[tokio::test]
async fn test_get_villa() {
    let server = common::create_test_server(RecordingSender::new());

    let response = server.get("/api/villas/1").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Villa Aurora");
    assert_eq!(json["price"], "€1,450 / night");
    assert_eq!(json["maxGuests"], 6);
    assert_eq!(json["bedrooms"], 3);
    assert!(!json["amenities"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_unknown_villa() {
    let server = common::create_test_server(RecordingSender::new());

    let response = server.get("/api/villas/99").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["villa_id"], 99);
}
