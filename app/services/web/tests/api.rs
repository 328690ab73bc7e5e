mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn api_requires_a_session() {
    let app = TestApp::new();
    for uri in ["/api/auth/orders", "/api/auth/me", "/api/admin/stats"] {
        let res = app.send(get(uri, None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
    let res = app.send(get("/api/auth/me", Some("not-a-jwt"))).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_api_is_forbidden_to_customers() {
    let app = TestApp::new();
    let token = app.customer("Ana", "ana@example.com").await;
    let res = app.send(get("/api/admin/orders", Some(&token))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = json_body(res).await;
    assert_eq!(body["code"], 5);

    let admin = app.admin("boss@example.com").await;
    let res = app.send(get("/api/admin/orders", Some(&admin))).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_reports_role_and_landing() {
    let app = TestApp::new();
    app.signup("Ana", "ana@example.com").await;
    let login = app.login("ana@example.com").await;
    assert_eq!(login["role"], "customer");
    assert_eq!(login["redirect"], "/customer-dashboard");

    let res = app
        .send(get("/api/auth/me", Some(&token(&login))))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-auth-access-token"));
    let me = json_body(res).await;
    assert_eq!(me["email"], "ana@example.com");
    assert_eq!(me["name"], "Ana");
    assert!(me.get("access_token").is_none());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = TestApp::new();
    app.signup("Ana", "ana@example.com").await;
    let res = app
        .send(json_request(
            "POST",
            "/api/login",
            None,
            json!({ "email": "ana@example.com", "password": "nope-nope" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["message"], "Invalid login credentials");
}

#[tokio::test]
async fn signup_checks_password_confirmation() {
    let app = TestApp::new();
    let res = app
        .send(json_request(
            "POST",
            "/api/signup",
            None,
            json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "secret123",
                "confirm_password": "secret124",
            }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["message"], "Passwords do not match!");
}

#[tokio::test]
async fn order_lifecycle_keeps_stats_in_step() {
    let app = TestApp::new();
    let token = app.customer("Ana", "ana@example.com").await;

    let res = app
        .send(json_request(
            "POST",
            "/api/auth/orders",
            Some(&token),
            json!({
                "service_type": "Dry Cleaning",
                "quantity": 2,
                "pickup_date": "2026-10-24",
                "pickup_time": "09:30:00",
                "total": 1,
            }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let order = json_body(res).await;
    assert_eq!(order["total"], 300);
    assert_eq!(order["status"], "Pending");
    let id = order["id"].as_i64().unwrap();

    let stats = json_body(app.send(get("/api/auth/stats", Some(&token))).await).await;
    assert_eq!(stats, json!({ "total_orders": 1, "completed": 0, "pending": 1 }));

    let res = app
        .send(json_request(
            "PUT",
            &format!("/api/auth/orders/{}", id),
            Some(&token),
            json!({
                "service_type": "Wash & Fold",
                "quantity": 3,
                "pickup_date": "2026-10-25",
                "pickup_time": "14:00:00",
                "status": "Completed",
            }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let order = json_body(res).await;
    assert_eq!(order["total"], 150);
    assert_eq!(order["service_type"], "Wash & Fold");

    let stats = json_body(app.send(get("/api/auth/stats", Some(&token))).await).await;
    assert_eq!(stats, json!({ "total_orders": 1, "completed": 1, "pending": 0 }));

    let admin = app.admin("boss@example.com").await;
    let stats = json_body(app.send(get("/api/admin/stats", Some(&admin))).await).await;
    assert_eq!(stats["total_orders"], 1);
    assert_eq!(stats["total_revenue"], 150);
    assert_eq!(stats["total_customers"], 1);

    let res = app
        .send(delete(&format!("/api/auth/orders/{}", id), &token))
        .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let orders = json_body(app.send(get("/api/auth/orders", Some(&token))).await).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn incomplete_order_is_rejected() {
    let app = TestApp::new();
    let token = app.customer("Ana", "ana@example.com").await;
    let res = app
        .send(json_request(
            "POST",
            "/api/auth/orders",
            Some(&token),
            json!({ "service_type": "Wash & Fold", "quantity": 0 }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["message"], "All fields are required!");
}

#[tokio::test]
async fn orders_of_other_customers_are_invisible() {
    let app = TestApp::new();
    let ana = app.customer("Ana", "ana@example.com").await;
    let bo = app.customer("Bo", "bo@example.com").await;
    let order = json_body(
        app.send(json_request(
            "POST",
            "/api/auth/orders",
            Some(&ana),
            json!({
                "service_type": "Ironing & Pressing",
                "quantity": 4,
                "pickup_date": "2026-10-24",
                "pickup_time": "08:00:00",
            }),
        ))
        .await,
    )
    .await;
    let uri = format!("/api/auth/orders/{}", order["id"]);

    let res = app.send(delete(&uri, &bo)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let orders = json_body(app.send(get("/api/auth/orders", Some(&bo))).await).await;
    assert_eq!(orders, json!([]));
    let orders = json_body(app.send(get("/api/auth/orders", Some(&ana))).await).await;
    assert_eq!(orders[0]["total"], 120);
}

#[tokio::test]
async fn admin_manages_every_order() {
    let app = TestApp::new();
    let ana = app.customer("Ana", "ana@example.com").await;
    let admin = app.admin("boss@example.com").await;
    let order = json_body(
        app.send(json_request(
            "POST",
            "/api/auth/orders",
            Some(&ana),
            json!({
                "service_type": "Dry Cleaning",
                "quantity": 1,
                "pickup_date": "2026-10-24",
                "pickup_time": "08:00:00",
            }),
        ))
        .await,
    )
    .await;
    let uri = format!("/api/admin/orders/{}", order["id"]);

    let listed = json_body(app.send(get("/api/admin/orders", Some(&admin))).await).await;
    assert_eq!(listed[0]["customer_name"], "Ana");
    assert_eq!(listed[0]["customer_email"], "ana@example.com");

    let res = app
        .send(json_request(
            "PATCH",
            &uri,
            Some(&admin),
            json!({ "quantity": 2, "status": "Completed" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = json_body(res).await;
    assert_eq!(updated["total"], 300);
    assert_eq!(updated["status"], "Completed");

    let res = app.send(delete(&uri, &admin)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = app.send(delete(&uri, &admin)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_replies_through_the_assistant() {
    let app = TestApp::new();
    let token = app.customer("Ana", "ana@example.com").await;
    let res = app
        .send(json_request(
            "POST",
            "/api/auth/chat",
            Some(&token),
            json!({ "message": "  How much is dry cleaning? " }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await["reply"],
        "LaundryBot heard: How much is dry cleaning?"
    );

    let res = app
        .send(json_request(
            "POST",
            "/api/auth/chat",
            Some(&token),
            json!({ "message": "   " }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_falls_back_when_the_assistant_fails() {
    let app = TestApp::with_assistant(Arc::new(Offline));
    let token = app.customer("Ana", "ana@example.com").await;
    let res = app
        .send(json_request(
            "POST",
            "/api/auth/chat",
            Some(&token),
            json!({ "message": "hello" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await["reply"],
        "Sorry, I couldn't process your request."
    );
}

fn bearer(uri: &str, credentials: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .uri(uri)
        .header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", credentials),
        )
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn bearer_clients_keep_renewing_expired_tokens() {
    let app = TestApp::new();
    let id = app.signup("Ana", "ana@example.com").await;
    let login = app.login("ana@example.com").await;
    let expired = expired_token(id, "ana@example.com");
    let first_refresh = login["refresh_token"].as_str().unwrap().to_owned();

    let res = app
        .send(bearer("/api/auth/me", &format!("{} {}", expired, first_refresh)))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(header_str(&res, "x-auth-access-token").is_some());
    let second_refresh = header_str(&res, "x-auth-refresh-token")
        .expect("rotated refresh token")
        .to_owned();
    assert_ne!(second_refresh, first_refresh);

    let res = app
        .send(bearer("/api/auth/me", &format!("{} {}", expired, second_refresh)))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(header_str(&res, "x-auth-refresh-token").is_some());

    let res = app
        .send(bearer("/api/auth/me", &format!("{} {}", expired, first_refresh)))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_tokens_are_not_rotated() {
    let app = TestApp::new();
    let token = app.customer("Ana", "ana@example.com").await;
    let res = app.send(get("/api/auth/me", Some(&token))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(header_str(&res, "x-auth-access-token"), Some(token.as_str()));
    assert!(header_str(&res, "x-auth-refresh-token").is_none());
}

#[tokio::test]
async fn malformed_order_body_answers_json_error() {
    let app = TestApp::new();
    let token = app.customer("Ana", "ana@example.com").await;
    let res = app
        .send(json_request(
            "POST",
            "/api/auth/orders",
            Some(&token),
            json!({
                "service_type": "Laundromat",
                "quantity": 2,
                "pickup_date": "2026-10-24",
                "pickup_time": "09:30:00",
            }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        header_str(&res, "content-type"),
        Some("application/json")
    );
    let body = json_body(res).await;
    assert_eq!(body["code"], 3);
    assert!(!body["message"].as_str().unwrap().is_empty());

    let res = app
        .send(json_request(
            "POST",
            "/api/auth/orders",
            Some(&token),
            json!({ "service_type": "Dry Cleaning", "pickup_date": "24/10/2026" }),
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["status"], 400);
}
