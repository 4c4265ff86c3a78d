//! API integration tests against a running server

use reqwest::{multipart, Client};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3333";

fn library_form(name: &str) -> multipart::Form {
    multipart::Form::new()
        .text("name", name.to_string())
        .text("latitude", "1")
        .text("longitude", "2")
        .text("about", "ok")
        .text("phone", "123")
        .text("website", "http://w")
        .text("facebook", "http://f")
        .text("instagram", "http://i")
        .text("opening_hours", "8-18")
        .text("open_on_weekends", "true")
}

fn image_part(file_name: &str) -> multipart::Part {
    multipart::Part::bytes(b"not really a jpeg".to_vec())
        .file_name(file_name.to_string())
        .mime_str("image/jpeg")
        .expect("Invalid mime type")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_and_show_library() {
    let client = Client::new();

    let form = library_form("Lib A").part("images", image_part("a.jpg"));
    let response = client
        .post(format!("{}/libraries", BASE_URL))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_i64().expect("No library ID");

    let response = client
        .get(format!("{}/libraries/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["open_on_weekends"], true);
    let images = body["images"].as_array().expect("No images");
    assert_eq!(images.len(), 1);

    // Rendered URL must actually serve the uploaded file
    let url = images[0]["url"].as_str().expect("No image URL");
    let response = client.get(url).send().await.expect("Failed to fetch image");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_invalid_library() {
    let client = Client::new();

    let form = multipart::Form::new()
        .text("name", "Incomplete")
        .text("about", "x".repeat(501));
    let response = client
        .post(format!("{}/libraries", BASE_URL))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["about"].is_array());
    assert!(body["errors"]["latitude"].is_array());
    assert!(body["errors"]["phone"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_list_libraries() {
    let client = Client::new();

    let response = client
        .get(format!("{}/libraries", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_get_missing_library() {
    let client = Client::new();

    let response = client
        .get(format!("{}/libraries/{}", BASE_URL, i32::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
