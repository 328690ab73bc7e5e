pub mod chat;

use app_error::AppError;
use async_trait::async_trait;
use tracing::*;

pub use chat::{FALLBACK_REPLY, GREETING, GeminiClient, SYSTEM_PROMPT};

pub const EMPTY_MESSAGE: &str = "Message must not be empty";

/// Answers one support question.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, AppError>;
}

/// Rejects blank messages; a failing assistant yields the fallback reply.
pub async fn answer(assistant: &dyn Assistant, message: &str) -> Result<String, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request(EMPTY_MESSAGE));
    }
    match assistant.reply(message).await {
        Ok(reply) => Ok(reply),
        Err(e) => {
            error!("Chat assistant failed: {}", e);
            Ok(FALLBACK_REPLY.to_owned())
        }
    }
}
