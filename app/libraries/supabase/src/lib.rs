//! Authentication against the hosted auth platform (GoTrue) and an in-process
//! stand-in that issues the same kind of tokens.

pub mod gotrue;
pub mod memory;

use app_error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use gotrue::GoTrueClient;
pub use memory::MemoryAuth;

/// The authenticated principal as reported by the auth platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthUser, AppError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError>;

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AppError>;

    /// Revokes the session the access token belongs to.
    async fn sign_out(&self, access_token: &str) -> Result<(), AppError>;
}
