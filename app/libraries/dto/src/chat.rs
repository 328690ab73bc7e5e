use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PostChatInput {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostChatOutput {
    pub reply: String,
}
