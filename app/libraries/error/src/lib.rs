use askama::Error as TemplateError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use log::warn;
use reqwest::Error as HttpClientError;
use serde::Serialize;
use serde_json::Error as JsonError;
use sqlx::Error as SqlxError;
use std::{error::Error as StdError, fmt, io::Error as IoError};

pub static SYSTEM_ERROR_CODE: i64 = -1000;
pub static SYSTEM_ERROR_CODE_DB: i64 = -1001;
pub static SYSTEM_ERROR_CODE_IO: i64 = -1002;
pub static SYSTEM_ERROR_CODE_CRYPTO: i64 = -1003;
pub static SYSTEM_ERROR_CODE_JSON: i64 = -1004;
pub static SYSTEM_ERROR_CODE_REMOTE: i64 = -1005;

pub static AUTH_ERROR_CODE: i64 = 2;
pub static VALIDATION_ERROR_CODE: i64 = 3;
pub static NOT_FOUND_ERROR_CODE: i64 = 4;
pub static FORBIDDEN_ERROR_CODE: i64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub message: String,
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub code: i64,
}

fn serialize_status<S>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_u16(status.as_u16())
}

impl AppError {
    pub fn new(message: impl Into<String>, status: StatusCode, code: i64) -> Self {
        Self {
            message: message.into(),
            status,
            code,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            message,
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE,
        )
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED, AUTH_ERROR_CODE)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::FORBIDDEN, FORBIDDEN_ERROR_CODE)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, VALIDATION_ERROR_CODE)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND, NOT_FOUND_ERROR_CODE)
    }

    /// Error reported by a remote collaborator (auth platform, chat API).
    pub fn remote(message: impl Into<String>, status: StatusCode) -> Self {
        Self::new(message, status, SYSTEM_ERROR_CODE_REMOTE)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{{"message":"{}","status":{},"code":{}}}"#,
            self.message,
            self.status.as_u16(),
            self.code
        )
    }
}

impl StdError for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(
            "AppError ({}): {} (HTTP {})",
            self.code,
            self.message,
            self.status.as_u16()
        );
        (self.status, Json(self)).into_response()
    }
}

// --------------------
// Error conversions
// --------------------

impl From<SqlxError> for AppError {
    fn from(value: SqlxError) -> Self {
        let status = match &value {
            SqlxError::RowNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(format!("{value:?}"), status, SYSTEM_ERROR_CODE_DB)
    }
}

impl From<IoError> for AppError {
    fn from(value: IoError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_IO,
        )
    }
}

impl From<JsonError> for AppError {
    fn from(value: JsonError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::INTERNAL_SERVER_ERROR,
            SYSTEM_ERROR_CODE_JSON,
        )
    }
}

impl From<JwtError> for AppError {
    fn from(value: JwtError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::UNAUTHORIZED,
            SYSTEM_ERROR_CODE_CRYPTO,
        )
    }
}

impl From<BcryptError> for AppError {
    fn from(value: BcryptError) -> Self {
        Self::new(
            format!("{value:?}"),
            StatusCode::BAD_REQUEST,
            SYSTEM_ERROR_CODE_CRYPTO,
        )
    }
}

impl From<HttpClientError> for AppError {
    fn from(value: HttpClientError) -> Self {
        Self::new(
            format!("{value}"),
            StatusCode::BAD_GATEWAY,
            SYSTEM_ERROR_CODE_REMOTE,
        )
    }
}

/// Malformed request bodies answer 400 with the usual JSON error shape.
impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::bad_request(value.body_text())
    }
}

impl From<TemplateError> for AppError {
    fn from(value: TemplateError) -> Self {
        Self::internal(format!("{value}"))
    }
}
