mod common;

use asset_allocation::{
    models::auth::{Caller, Role},
    router::router,
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{company, employee, Company};

fn app(acme: &Company) -> Router {
    router(acme.state.clone())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    caller: Option<&Caller>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        let role = match caller.role {
            Role::Hr => "hr",
            Role::Employee => "employee",
        };
        builder = builder
            .header("x-user-id", caller.id.to_string())
            .header("x-user-role", role)
            .header("x-user-email", caller.email.as_str());
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_is_public() {
    let acme = company(5, 0).await;
    let (status, _) = send(&app(&acme), "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_or_bad_identity_is_unauthenticated() {
    let acme = company(5, 0).await;
    let app = app(&acme);

    let (status, body) = send(&app, "GET", "/api/assets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");

    let request = Request::builder()
        .uri("/api/assignments")
        .header("x-user-id", "not-a-uuid")
        .header("x-user-role", "employee")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/assignments")
        .header("x-user-id", acme.hr.id.to_string())
        .header("x-user-role", "admin")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_approval_round_trip() {
    let acme = company(5, 0).await;
    let app = app(&acme);
    let alice = employee();

    let (status, asset) = send(
        &app,
        "POST",
        "/api/assets",
        Some(&acme.hr),
        Some(json!({ "name": "Laptop", "assetType": "returnable", "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(asset["availableQuantity"], 2);
    let asset_id = asset["id"].as_str().unwrap().to_string();

    let (status, request) = send(
        &app,
        "POST",
        "/api/requests",
        Some(&alice),
        Some(json!({ "assetId": asset_id, "note": "for onboarding" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["status"], "pending");
    let request_id = request["id"].as_str().unwrap().to_string();

    let uri = format!("/api/requests/{request_id}/approve");
    let (status, decision) = send(&app, "PATCH", &uri, Some(&acme.hr), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decision["request"]["status"], "approved");
    assert_eq!(decision["allocation"]["affiliationCreated"], true);
    assert_eq!(decision["allocation"]["asset"]["availableQuantity"], 1);
    let assignment_id = decision["allocation"]["assignment"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "PATCH", &uri, Some(&acme.hr), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_PROCESSED");
    assert_eq!(body["retryable"], false);

    let (status, mine) = send(&app, "GET", "/api/assignments", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, returned) = send(
        &app,
        "PATCH",
        &format!("/api/assignments/{assignment_id}/return"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["status"], "return_requested");

    let (status, returned) = send(
        &app,
        "PATCH",
        &format!("/api/assignments/{assignment_id}/approve-return"),
        Some(&acme.hr),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["status"], "returned");

    let (_, asset) = send(&app, "GET", &format!("/api/assets/{asset_id}"), Some(&alice), None).await;
    assert_eq!(asset["availableQuantity"], 2);
}

#[tokio::test]
async fn domain_errors_map_to_distinct_statuses() {
    let acme = company(1, 0).await;
    let app = app(&acme);

    let (_, asset) = send(
        &app,
        "POST",
        "/api/assets",
        Some(&acme.hr),
        Some(json!({ "name": "Monitor", "assetType": "returnable", "quantity": 1 })),
    )
    .await;
    let asset_id = asset["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/assignments",
        Some(&acme.hr),
        Some(json!({ "assetId": asset_id, "employeeId": employee().id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Stock is gone
    let (status, body) = send(
        &app,
        "POST",
        "/api/assignments",
        Some(&acme.hr),
        Some(json!({ "assetId": asset_id, "employeeId": employee().id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "OUT_OF_STOCK");

    // Seats are gone
    let (_, spare) = send(
        &app,
        "POST",
        "/api/assets",
        Some(&acme.hr),
        Some(json!({ "name": "Keyboard", "assetType": "non_returnable", "quantity": 5 })),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/assignments",
        Some(&acme.hr),
        Some(json!({ "assetId": spare["id"], "employeeId": employee().id })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], "QUOTA_EXCEEDED");

    // Employees cannot stock assets
    let (status, body) = send(
        &app,
        "POST",
        "/api/assets",
        Some(&employee()),
        Some(json!({ "name": "Chair", "assetType": "returnable", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, body) = send(
        &app,
        "POST",
        "/api/assets",
        Some(&acme.hr),
        Some(json!({ "name": "Chair", "assetType": "returnable", "quantity": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["quantity"].is_array());

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/requests/{}", uuid::Uuid::new_v4()),
        Some(&acme.hr),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn removing_an_employee_returns_the_report() {
    let acme = company(5, 0).await;
    let app = app(&acme);
    let alice = employee();

    let laptop = acme.stock("Laptop", asset_allocation::models::asset::AssetType::Returnable, 1).await;
    acme.state
        .coordinator
        .direct_assign(&acme.hr, laptop.id, alice.id)
        .await
        .unwrap();

    let (status, staff) = send(&app, "GET", "/api/affiliations/employees", Some(&acme.hr), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(staff.as_array().unwrap().len(), 1);

    let (status, report) = send(
        &app,
        "DELETE",
        &format!("/api/affiliations/{}", alice.id),
        Some(&acme.hr),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["reclaimed"].as_array().unwrap().len(), 1);
    assert!(report["failed"].as_array().unwrap().is_empty());

    let (_, companies) = send(&app, "GET", "/api/affiliations", Some(&alice), None).await;
    assert!(companies.as_array().unwrap().is_empty());
    assert_eq!(acme.available(&laptop).await, 1);
}
