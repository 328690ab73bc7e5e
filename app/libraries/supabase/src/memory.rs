use crate::{AuthProvider, AuthSession, AuthUser};
use app_cryptography::{
    hash::{hash, verify},
    jwt::{Algorithm, Claims, UserMetadata, generate_token, validate_token},
};
use app_error::{AUTH_ERROR_CODE, AppError};
use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::*;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid login credentials";
const REFRESH_NOT_FOUND: &str = "Invalid Refresh Token: Refresh Token Not Found";
const REFRESH_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Clone)]
struct StoredUser {
    id: Uuid,
    email: String,
    full_name: String,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct RefreshEntry {
    email: String,
    session_id: String,
    issued_at: i64,
}

impl RefreshEntry {
    fn expired(&self, now: i64) -> bool {
        now - self.issued_at > Duration::days(REFRESH_LIFETIME_DAYS).num_seconds()
    }
}

/// In-process auth provider for local runs and tests. Issues HS256 tokens with
/// the same claims and audience as the hosted platform.
pub struct MemoryAuth {
    jwt_secret: String,
    audience: String,
    access_minutes: i64,
    users: RwLock<HashMap<String, StoredUser>>,
    refresh_tokens: RwLock<HashMap<String, RefreshEntry>>,
}

impl MemoryAuth {
    pub fn new(jwt_secret: impl Into<String>, audience: impl Into<String>, access_minutes: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            audience: audience.into(),
            access_minutes,
            users: RwLock::new(HashMap::new()),
            refresh_tokens: RwLock::new(HashMap::new()),
        }
    }

    fn issue(&self, user: &StoredUser, session_id: String) -> Result<AuthSession, AppError> {
        let iat = Utc::now().timestamp();
        let exp = (Utc::now() + Duration::minutes(self.access_minutes)).timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            aud: self.audience.clone(),
            role: "authenticated".to_owned(),
            exp,
            iat,
            session_id: Some(session_id.clone()),
            user_metadata: UserMetadata {
                full_name: Some(user.full_name.clone()),
            },
        };
        let access_token = generate_token(Algorithm::HS256, &self.jwt_secret, &claims)?;
        let refresh_token = Uuid::new_v4().simple().to_string();
        let mut refresh_tokens = self.refresh_tokens.write();
        // One live refresh token per session; stale sessions are dropped on the way.
        refresh_tokens.retain(|_, entry| entry.session_id != session_id && !entry.expired(iat));
        refresh_tokens.insert(
            refresh_token.clone(),
            RefreshEntry {
                email: user.email.clone(),
                session_id,
                issued_at: iat,
            },
        );
        drop(refresh_tokens);
        Ok(AuthSession {
            access_token,
            refresh_token,
            expires_in: self.access_minutes * 60,
            user: AuthUser {
                id: user.id,
                email: user.email.clone(),
                full_name: Some(user.full_name.clone()),
            },
        })
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn auth_error(message: &str, status: StatusCode) -> AppError {
    AppError::new(message, status, AUTH_ERROR_CODE)
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthUser, AppError> {
        let email = normalize(email);
        if password.len() < MIN_PASSWORD_LEN {
            return Err(auth_error(
                "Password should be at least 6 characters.",
                StatusCode::UNPROCESSABLE_ENTITY,
            ));
        }
        if self.users.read().contains_key(&email) {
            return Err(auth_error(
                "User already registered",
                StatusCode::UNPROCESSABLE_ENTITY,
            ));
        }
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("{}", e)))??;
        let user = StoredUser {
            id: Uuid::new_v4(),
            email: email.clone(),
            full_name: full_name.to_owned(),
            password_hash,
        };
        let mut users = self.users.write();
        if users.contains_key(&email) {
            return Err(auth_error(
                "User already registered",
                StatusCode::UNPROCESSABLE_ENTITY,
            ));
        }
        users.insert(email, user.clone());
        info!("Registered {} in memory auth", user.id);
        Ok(AuthUser {
            id: user.id,
            email: user.email,
            full_name: Some(user.full_name),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let user = match self.users.read().get(&normalize(email)) {
            Some(user) => user.clone(),
            None => return Err(auth_error(INVALID_CREDENTIALS, StatusCode::BAD_REQUEST)),
        };
        let password = password.to_owned();
        let password_hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("{}", e)))??;
        if !valid {
            return Err(auth_error(INVALID_CREDENTIALS, StatusCode::BAD_REQUEST));
        }
        self.issue(&user, Uuid::new_v4().to_string())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AppError> {
        let entry = match self.refresh_tokens.write().remove(refresh_token) {
            Some(entry) if !entry.expired(Utc::now().timestamp()) => entry,
            _ => return Err(auth_error(REFRESH_NOT_FOUND, StatusCode::BAD_REQUEST)),
        };
        let user = match self.users.read().get(&entry.email) {
            Some(user) => user.clone(),
            None => return Err(auth_error("User not found", StatusCode::BAD_REQUEST)),
        };
        self.issue(&user, entry.session_id)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let claims = validate_token::<Claims>(
            Algorithm::HS256,
            &self.jwt_secret,
            &self.audience,
            access_token,
        )?
        .claims;
        if let Some(session_id) = claims.session_id {
            self.refresh_tokens
                .write()
                .retain(|_, entry| entry.session_id != session_id);
        }
        Ok(())
    }
}
