//! Integration tests that exercise the HTTP client against a loopback stub
//! of the payrun back-end.
//!
//! These complement the unit tests inside client.rs (URL assembly, envelope
//! defaults) by verifying the full request/decode path end-to-end.

use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use payrun_client::HttpPayrunService;
use payrun_core::derivation::{InputField, InputState};
use payrun_core::{EmployeeDetails, PayrunService, RegimeSuggestion, ServiceError};

/// Serve `app` on an ephemeral loopback port and return the base URL.
async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn employee_json() -> Value {
    json!({
        "employeeName": "Asha Rao",
        "employeeNumber": "E1042",
        "totalEarnings": 1450000.0,
        "pf": 86400.0,
        "vpf": 12000.0,
        "npsMaxLimit": 72500.0,
        "npsMaxLimitOld": 72500.0,
        "npsMaxLimitNew": 101500.0,
        "fbp": [
            {
                "payHeadID": 12,
                "payHeadName": "LTA",
                "amount": 0.0,
                "maxLimit": 50000.0,
                "allowedTaxRegime": 1,
                "criteriaOption": ""
            }
        ],
        "isFySwitch": 1
    })
}

fn result_json() -> Value {
    json!({
        "oldRegime": {
            "grossIncome": 1450000.0,
            "hra": 120000.0,
            "pt": 2400.0,
            "chpaterVIOther": 75000.0,
            "fbp": 50000.0,
            "taxableIncome": 1042600.0,
            "rebate": 0.0,
            "surchargeIncome": 0.0,
            "taxIncludingSurchargeIncome": 125280.0,
            "cess": 5011.2,
            "totalTaxWithCess": 130291.2,
            "taxSlabs": []
        },
        "newRegime": {
            "grossIncome": 1450000.0,
            "hra": 0.0,
            "pt": 0.0,
            "chpaterVIOther": 0.0,
            "fbp": 0.0,
            "taxableIncome": 1375000.0,
            "rebate": 0.0,
            "surchargeIncome": 0.0,
            "taxIncludingSurchargeIncome": 112500.0,
            "cess": 4500.0,
            "totalTaxWithCess": 117000.0,
            "taxSlabs": []
        },
        "suggestion": "NEW",
        "savings": 13291.2
    })
}

#[tokio::test]
async fn employee_details_decodes_a_success_envelope() {
    let app = Router::new().route(
        "/get-employee-details-ency/{user}",
        get(|Path(user): Path<String>| async move {
            assert_eq!(user, "58368");
            Json(json!({ "success": true, "data": employee_json() }))
        }),
    );
    let service = HttpPayrunService::new(spawn_stub(app).await);

    let employee = service.employee_details("58368").await.unwrap();

    assert_eq!(employee.employee_name, "Asha Rao");
    assert_eq!(employee.total_earnings, dec!(1450000));
    assert_eq!(employee.fbp.len(), 1);
    assert!(employee.computation_window_open());
}

#[tokio::test]
async fn employee_details_rejection_carries_the_server_message() {
    let app = Router::new().route(
        "/get-employee-details-ency/{user}",
        get(|| async { Json(json!({ "success": false, "message": "Employee not found" })) }),
    );
    let service = HttpPayrunService::new(spawn_stub(app).await);

    let err = service.employee_details("0").await.unwrap_err();

    assert_eq!(err, ServiceError::Rejected("Employee not found".to_string()));
}

#[tokio::test]
async fn compute_tax_posts_the_payload_and_decodes_the_result() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let app = Router::new().route(
        "/income-tax",
        post({
            let seen = seen.clone();
            move |Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    *seen.lock().unwrap() = Some(body);
                    Json(json!({ "success": true, "data": result_json() }))
                }
            }
        }),
    );
    let service = HttpPayrunService::new(spawn_stub(app).await);

    let employee: EmployeeDetails = serde_json::from_value(employee_json()).unwrap();
    let mut inputs = InputState::new();
    inputs.prefill(&employee);
    inputs.set(InputField::HraPaid, dec!(240000));
    inputs.set_fbp_to_max(0);
    let request = inputs.build_request("2025-2026", "58368", &employee);

    let result = service.compute_tax(&request).await.unwrap();

    assert_eq!(result.suggestion, RegimeSuggestion::New);
    assert_eq!(result.savings, dec!(13291.2));

    let body = seen.lock().unwrap().take().expect("stub saw the payload");
    assert_eq!(body["financialYear"], "2025-2026");
    assert_eq!(body["incomeDetails"]["userids"], "58368");
    assert_eq!(body["incomeDetails"]["fbp"], 50000.0);
    assert_eq!(
        body["incomeDetails"]["fbpDetails"][0]["adjustedAmount"],
        50000.0
    );
}

#[tokio::test]
async fn compute_failure_with_envelope_surfaces_the_message() {
    let app = Router::new().route(
        "/income-tax",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Computation window closed" })),
            )
        }),
    );
    let service = HttpPayrunService::new(spawn_stub(app).await);

    let employee = EmployeeDetails::default();
    let request = InputState::new().build_request("2025-2026", "58368", &employee);

    let err = service.compute_tax(&request).await.unwrap_err();
    assert_eq!(
        err.server_message(),
        Some("Computation window closed"),
        "envelope message should win over the HTTP status"
    );
}

#[tokio::test]
async fn success_status_with_garbage_body_is_invalid_response() {
    let app = Router::new().route("/income-tax", post(|| async { "not json" }));
    let service = HttpPayrunService::new(spawn_stub(app).await);

    let request = InputState::new().build_request("2025-2026", "58368", &EmployeeDetails::default());

    let err = service.compute_tax(&request).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn error_status_without_envelope_maps_to_transport() {
    let app = Router::new().route(
        "/income-tax",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
    );
    let service = HttpPayrunService::new(spawn_stub(app).await);

    let request = InputState::new().build_request("2025-2026", "58368", &EmployeeDetails::default());

    let err = service.compute_tax(&request).await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn rating_hits_the_expected_path() {
    let app = Router::new().route(
        "/updated-rating/{user}/{stars}",
        get(|Path((user, stars)): Path<(String, u8)>| async move {
            assert_eq!(user, "58368");
            assert_eq!(stars, 4);
            Json(json!({ "success": true }))
        }),
    );
    let service = HttpPayrunService::new(spawn_stub(app).await);

    service.submit_rating("58368", 4).await.unwrap();
}

#[tokio::test]
async fn rating_failure_is_an_error_but_not_a_rejection() {
    let app = Router::new().route(
        "/updated-rating/{user}/{stars}",
        get(|| async { StatusCode::NOT_FOUND }),
    );
    let service = HttpPayrunService::new(spawn_stub(app).await);

    let err = service.submit_rating("58368", 4).await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_back_end_is_a_transport_error() {
    // Bind then immediately drop to obtain a port with no listener.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = HttpPayrunService::new(format!("http://{addr}"));
    let err = service.employee_details("58368").await.unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}
