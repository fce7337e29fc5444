//! HTTP tests for the public settings and hotel endpoints.
//!
//! Run against the in-memory settings backend; no database required.

mod common;

use axum::http::{Method, StatusCode};
use common::{get_request, in_memory_app, parse_response_body, request_with_api_key};
use domain::models::{NewSetting, SettingType, SettingValue};
use fake::{faker::company::en::CompanyName, Fake};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_hotel_info_defaults_on_empty_store() {
    let app = in_memory_app();

    let response = app
        .router
        .oneshot(get_request("/api/v1/hotel/info"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["name"], "Orlando International Resorts");
    assert_eq!(body["phone"], "+254 742 824 006");
}

#[tokio::test]
async fn test_hotel_info_reflects_stored_name() {
    let app = in_memory_app();
    let name: String = CompanyName().fake();
    app.store
        .set(NewSetting::new("hotel_name", name.clone()).in_category("hotel"))
        .await
        .unwrap();

    let body = parse_response_body(
        app.router
            .oneshot(get_request("/api/v1/hotel/info"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["name"], name);
}

#[tokio::test]
async fn test_contact_links() {
    let app = in_memory_app();
    app.store
        .set(NewSetting::new("hotel_phone", "+254 742 824 006").in_category("hotel"))
        .await
        .unwrap();
    app.store
        .set(NewSetting::new("hotel_email", "stay@example.com").in_category("hotel"))
        .await
        .unwrap();

    let body = parse_response_body(
        app.router
            .oneshot(get_request("/api/v1/hotel/contact"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["phone_link"], "tel:+254742824006");
    assert_eq!(body["email_link"], "mailto:stay@example.com");
    assert_eq!(body["whatsapp_link"], "https://wa.me/254742824006");
}

#[tokio::test]
async fn test_business_config_coerces_numbers() {
    let app = in_memory_app();
    app.store
        .set(
            NewSetting::new("service_charge", "12.5")
                .with_type(SettingType::Number)
                .in_category("business"),
        )
        .await
        .unwrap();

    let body = parse_response_body(
        app.router
            .oneshot(get_request("/api/v1/hotel/business"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["service_charge"], 12.5);
    assert_eq!(body["tax_rate"], 16.0);
    assert_eq!(body["payment_methods"], json!(["M-Pesa", "Cash", "Card"]));
}

#[tokio::test]
async fn test_public_settings_hide_private_values() {
    let app = in_memory_app();
    app.store.initialize_defaults().await.unwrap();
    app.store
        .set(NewSetting::new("mpesa_passkey", "secret").in_category("system"))
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(get_request("/api/v1/settings/public"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["hotel_name"], "Orlando International Resorts");
    assert_eq!(body["maintenance_mode"], false);
    assert_eq!(body["tax_rate"], 16.0);
    assert!(body.get("mpesa_passkey").is_none());
    assert!(body.get("mpesa_shortcode").is_none());
}

#[tokio::test]
async fn test_public_settings_empty_when_storage_down() {
    let app = in_memory_app();
    app.store.initialize_defaults().await.unwrap();
    app.backend.set_unavailable(true);

    let response = app
        .router
        .oneshot(get_request("/api/v1/settings/public"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await, json!({}));
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let app = in_memory_app();

    let response = app
        .router
        .oneshot(get_request("/api/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("strict-transport-security"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = in_memory_app();
    let request = axum::http::Request::builder()
        .uri("/api/health/live")
        .header("X-Request-ID", "front-desk-42")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "front-desk-42");
}

#[tokio::test]
async fn test_admin_routes_require_api_key() {
    let app = in_memory_app();

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/v1/admin/settings"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "unauthorized");

    let response = app
        .router
        .oneshot(request_with_api_key(
            Method::PUT,
            "/api/v1/admin/settings/hotel_name",
            "not-a-key",
            Some(json!({ "value": "Hijacked" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.backend.row("hotel_name").is_none());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = in_memory_app();
    let response = app
        .router
        .oneshot(get_request("/api/v1/hotel/rooms"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = in_memory_app();
    app.store
        .set(NewSetting::new("hotel_name", "Grand").in_category("hotel"))
        .await
        .unwrap();
    app.store.get("hotel_name", SettingValue::Null).await;

    let response = app.router.oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["connected"], false);
    assert_eq!(body["settings_cache"]["entries"], 1);
}
