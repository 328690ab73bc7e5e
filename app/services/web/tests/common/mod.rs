#![allow(dead_code)]

use app_config::AppConfig;
use app_cryptography::jwt::{Algorithm, Claims, UserMetadata, generate_token};
use app_error::AppError;
use app_gemini::Assistant;
use app_schema::profile::Role;
use app_state::AppState;
use app_store::MemoryStore;
use app_supabase::MemoryAuth;
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::{Duration, Utc};
use laundry_web::router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "integration-test-secret-0123456789";
pub const PASSWORD: &str = "secret123";

pub struct Echo;

#[async_trait]
impl Assistant for Echo {
    async fn reply(&self, message: &str) -> Result<String, AppError> {
        Ok(format!("LaundryBot heard: {}", message))
    }
}

pub struct Offline;

#[async_trait]
impl Assistant for Offline {
    async fn reply(&self, _message: &str) -> Result<String, AppError> {
        Err(AppError::internal("connection refused"))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_assistant(Arc::new(Echo))
    }

    pub fn with_assistant(assistant: Arc<dyn Assistant>) -> Self {
        let config = AppConfig::from_reader(
            json!({
                "backend_bind": "127.0.0.1:0",
                "log_level": "Off",
                "asset_path": "./assets",
                "store": "Memory",
                "auth": "Memory",
                "jwt_secret": SECRET,
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState {
            auth: Arc::new(MemoryAuth::new(
                SECRET,
                config.jwt_audience.clone(),
                config.jwt_access_session_minutes,
            )),
            config,
            store: store.clone(),
            assistant,
        });
        Self {
            router: router(state),
            store,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn signup(&self, name: &str, email: &str) -> Uuid {
        let res = self
            .send(json_request(
                "POST",
                "/api/signup",
                None,
                json!({
                    "name": name,
                    "email": email,
                    "password": PASSWORD,
                    "confirm_password": PASSWORD,
                }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = json_body(res).await;
        body["id"].as_str().unwrap().parse().unwrap()
    }

    pub async fn login(&self, email: &str) -> Value {
        let res = self
            .send(json_request(
                "POST",
                "/api/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        json_body(res).await
    }

    /// Signs up and logs in a customer, returning its access token.
    pub async fn customer(&self, name: &str, email: &str) -> String {
        self.signup(name, email).await;
        token(&self.login(email).await)
    }

    pub async fn admin(&self, email: &str) -> String {
        let id = self.signup("Admin", email).await;
        assert!(self.store.set_role(id, Role::Admin));
        token(&self.login(email).await)
    }
}

pub fn token(login: &Value) -> String {
    login["access_token"].as_str().unwrap().to_owned()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

pub async fn json_body(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(res: &Response) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` pairs from every Set-Cookie header, ready for a Cookie header.
pub fn cookie_jar(res: &Response) -> String {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<&str>>()
        .join("; ")
}

/// An access token signed with the right secret that expired an hour ago.
pub fn expired_token(user_id: Uuid, email: &str) -> String {
    let issued = Utc::now() - Duration::hours(2);
    generate_token(
        Algorithm::HS256,
        SECRET,
        Claims {
            sub: user_id.to_string(),
            email: email.to_owned(),
            aud: "authenticated".to_owned(),
            role: "authenticated".to_owned(),
            exp: (issued + Duration::hours(1)).timestamp(),
            iat: issued.timestamp(),
            session_id: None,
            user_metadata: UserMetadata::default(),
        },
    )
    .unwrap()
}

pub fn header_str<'a>(res: &'a Response, name: &str) -> Option<&'a str> {
    res.headers().get(name).and_then(|v| v.to_str().ok())
}
