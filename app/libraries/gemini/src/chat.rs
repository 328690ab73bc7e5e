use crate::Assistant;
use app_config::AppConfig;
use app_error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use tracing::*;

pub const SYSTEM_PROMPT: &str = "You are LaundryBot, the assistant for LaundryMS.
You ONLY provide information about:
- Services: Wash & Fold (\u{20b1}50/kg), Ironing & Pressing (\u{20b1}30/piece), Dry Cleaning (\u{20b1}150/piece)
- Orders: creating, updating, cancelling
- Scheduling: customers can schedule any date and time
- Customer support

If a user asks anything unrelated to LaundryMS, reply:
\"I can only help with LaundryMS-related questions.\"
Be polite, concise, and friendly.";

pub const GREETING: &str =
    "Hi! I'm LaundryBot \u{1f916}. I can help you with your laundry orders and scheduling!";

pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<GeminiContent<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent<'a> {
    pub role: &'a str, // "user" | "model"
    pub parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContentOut>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiContentOut {
    #[serde(default)]
    pub parts: Vec<GeminiPartOut>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiPartOut {
    #[serde(default)]
    pub text: String,
}

fn text<'a>(role: &'a str, text: &'a str) -> GeminiContent<'a> {
    GeminiContent {
        role,
        parts: vec![GeminiPart { text }],
    }
}

/// One scripted turn: the topic restriction, the bot greeting, then the user's message.
pub fn build_request(user_message: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![
            text("user", SYSTEM_PROMPT),
            text("model", GREETING),
            text("user", user_message),
        ],
        generation_config: GenerationConfig {
            temperature: 0.2,
            max_output_tokens: 512,
        },
    }
}

/// Concatenates the text parts of the first candidate.
pub fn parse_answer(body: &str) -> Result<String, AppError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    let answer = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<String>>()
                .join("")
        })
        .unwrap_or_default();

    if answer.trim().is_empty() {
        return Err(AppError::internal("Chat answer is empty"));
    }
    Ok(answer)
}

pub struct GeminiClient {
    url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            config.gemini_base_url.trim_end_matches('/'),
            &config.gemini_model
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if !config.gemini_api_key.trim().is_empty() {
            let key = header::HeaderValue::from_str(&config.gemini_api_key)
                .map_err(|e| AppError::internal(format!("{}", e)))?;
            headers.insert("x-goog-api-key", key);
        } else {
            warn!("gemini_api_key is empty; chat requests will be rejected");
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl Assistant for GeminiClient {
    async fn reply(&self, message: &str) -> Result<String, AppError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&build_request(message))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::remote(
                format!("gemini returned {}: {}", status, body),
                StatusCode::BAD_GATEWAY,
            ));
        }

        parse_answer(&body)
    }
}
