//! The Ollama wire shapes this gateway speaks on its inbound side, per
//! spec §3. These types are deliberately permissive on input (unknown
//! fields are ignored by `serde`'s default behavior) and exact on output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ModelDetails {
    pub parent_model: String,
    pub format: String,
    pub family: String,
    pub families: Vec<String>,
    pub parameter_size: String,
    pub quantization_level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelEntry {
    /// MUST equal `model` (invariant I1).
    pub name: String,
    pub model: String,
    /// RFC 3339 with explicit timezone offset (invariant I2).
    pub modified_at: String,
    pub size: u64,
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ModelDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagsResponse {
    pub models: Vec<ModelEntry>,
}

// ---------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_true")]
    pub stream: bool,
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub format: Option<serde_json::Value>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub context: Option<Vec<i32>>,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub keep_alive: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

/// A single frame of a `/api/generate` streaming response (invariant I4).
pub type GenerateFrame = GenerateResponse;

// ---------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    pub arguments: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default = "default_function_type")]
    pub call_type: String,
    pub function: ToolCallFunction,
}

fn default_function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchemaFunction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type", default = "default_function_type")]
    pub schema_type: String,
    pub function: ToolSchemaFunction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default = "default_true")]
    pub stream: bool,
    #[serde(default)]
    pub format: Option<serde_json::Value>,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub tools: Option<Vec<ToolSchema>>,
    #[serde(default)]
    pub keep_alive: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponseMessage {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub model: String,
    pub created_at: String,
    pub message: ChatResponseMessage,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

/// A single frame of a `/api/chat` streaming response (invariant I5).
pub type ChatFrame = ChatResponse;

// ---------------------------------------------------------------------
// Embeddings
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt: String,
    /// Accepted as a synonym for `prompt` per the Open Questions note in
    /// spec §9; populated only when the caller used `input` instead.
    #[serde(default)]
    pub input: Option<String>,
}

impl EmbedRequest {
    /// Resolves the effective prompt text, honoring the `input` synonym.
    pub fn effective_prompt(&self) -> &str {
        if !self.prompt.is_empty() {
            &self.prompt
        } else {
            self.input.as_deref().unwrap_or("")
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f32>,
}

// ---------------------------------------------------------------------
// Errors and misc
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBody {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionBody {
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

impl Default for HealthBody {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_defaults_stream_true() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"model":"gpt-4","prompt":"hi"}"#).unwrap();
        assert!(req.stream);
    }

    #[test]
    fn generate_request_ignores_unknown_fields() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"model":"gpt-4","prompt":"hi","bogus":true}"#).unwrap();
        assert_eq!(req.model, "gpt-4");
    }

    #[test]
    fn embed_request_prefers_prompt_over_input() {
        let req: EmbedRequest =
            serde_json::from_str(r#"{"model":"m","prompt":"p","input":"i"}"#).unwrap();
        assert_eq!(req.effective_prompt(), "p");
    }

    #[test]
    fn embed_request_falls_back_to_input() {
        let req: EmbedRequest = serde_json::from_str(r#"{"model":"m","input":"i"}"#).unwrap();
        assert_eq!(req.effective_prompt(), "i");
    }
}
