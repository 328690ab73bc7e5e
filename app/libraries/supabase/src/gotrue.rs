use crate::{AuthProvider, AuthSession, AuthUser};
use app_config::AppConfig;
use app_error::{AUTH_ERROR_CODE, AppError};
use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::{Client, Response, header};
use serde::{Deserialize, Serialize};
use tracing::*;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpData<'a>,
}

#[derive(Debug, Serialize)]
struct SignUpData<'a> {
    full_name: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: GoTrueMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct GoTrueMetadata {
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: i64,
    user: GoTrueUser,
}

/// Sign-up answers with a session when e-mail confirmation is off, and with
/// the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(GoTrueSession),
    User(GoTrueUser),
}

#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl From<GoTrueUser> for AuthUser {
    fn from(user: GoTrueUser) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            full_name: user.user_metadata.full_name,
        }
    }
}

impl From<GoTrueSession> for AuthSession {
    fn from(session: GoTrueSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user: session.user.into(),
        }
    }
}

/// Client for the platform's `/auth/v1` endpoints.
pub struct GoTrueClient {
    base_url: String,
    client: Client,
}

impl GoTrueClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let api_key = header::HeaderValue::from_str(&config.supabase_anon_key)
            .map_err(|e| AppError::internal(format!("{}", e)))?;
        headers.insert("apikey", api_key);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: format!("{}/auth/v1", config.supabase_url.trim_end_matches('/')),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns a non-success answer into an `AppError` carrying the platform's message.
async fn ensure_success(resp: Response) -> Result<Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(error_from_body(status.as_u16(), &body))
}

fn error_from_body(status: u16, body: &str) -> AppError {
    let parsed: GoTrueError = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| format!("auth service returned {}", status));
    let status = match StatusCode::from_u16(status) {
        Ok(s) if s.is_client_error() => s,
        _ => StatusCode::BAD_GATEWAY,
    };
    AppError::new(message, status, AUTH_ERROR_CODE)
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthUser, AppError> {
        let req = SignUpRequest {
            email,
            password,
            data: SignUpData { full_name },
        };
        let resp = self.client.post(self.url("/signup")).json(&req).send().await?;
        let resp = ensure_success(resp).await?;
        let user = match resp.json::<SignUpResponse>().await? {
            SignUpResponse::Session(session) => session.user,
            SignUpResponse::User(user) => user,
        };
        debug!("Signed up {}", user.id);
        Ok(user.into())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let resp = self
            .client
            .post(self.url("/token?grant_type=password"))
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        let session: GoTrueSession = ensure_success(resp).await?.json().await?;
        Ok(session.into())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AppError> {
        let resp = self
            .client
            .post(self.url("/token?grant_type=refresh_token"))
            .json(&RefreshGrant { refresh_token })
            .send()
            .await?;
        let session: GoTrueSession = ensure_success(resp).await?.json().await?;
        Ok(session.into())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let resp = self
            .client
            .post(self.url("/logout"))
            .bearer_auth(access_token)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }
}
