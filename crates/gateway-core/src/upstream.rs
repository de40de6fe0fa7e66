//! The upstream call shape: what the Translator produces and the Upstream
//! Client consumes. Kept separate from `async-openai`'s request types so
//! the Translator stays a pure function of Ollama-shaped input, with no
//! dependency on the HTTP client crate.

use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct UpstreamOptions {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub seed: Option<i64>,
    pub max_tokens: Option<u32>,
    pub stop: Option<Vec<String>>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

#[derive(Debug, Clone)]
pub enum UpstreamRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone)]
pub struct UpstreamMessage {
    pub role: UpstreamRole,
    pub content: String,
    /// Base64-encoded image parts, forwarded as upstream multi-modal
    /// content parts when the message carries any (spec §4.2.3).
    pub images: Vec<String>,
}

/// How the caller's `format` field should be represented to the backend.
#[derive(Debug, Clone)]
pub enum ResponseFormatSpec {
    JsonObject,
    JsonSchema(Value),
}

/// Parameters for a chat-completion call against the upstream backend,
/// produced by the Translator from either a `GenerateRequest` or a
/// `ChatRequest`.
#[derive(Debug, Clone)]
pub struct UpstreamChatParams {
    pub model: String,
    pub messages: Vec<UpstreamMessage>,
    pub options: UpstreamOptions,
    pub response_format: Option<ResponseFormatSpec>,
    pub tools: Option<Vec<Value>>,
    pub stream: bool,
}

/// Parameters for an embedding call against the upstream backend.
#[derive(Debug, Clone)]
pub struct UpstreamEmbedParams {
    pub model: String,
    pub input: String,
}

/// One entry from the upstream backend's model listing.
#[derive(Debug, Clone)]
pub struct UpstreamModelInfo {
    pub id: String,
    /// Creation time as epoch seconds, as the OpenAI `/v1/models` shape
    /// reports it.
    pub created: i64,
}

/// Token usage as the upstream backend reports it, present on both unary
/// responses and the terminal chunk of a stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpstreamUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// The reason the upstream backend stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFinishReason {
    Stop,
    Length,
    ToolCalls,
    Other,
}

impl UpstreamFinishReason {
    /// Maps to the Ollama `done_reason` vocabulary per spec §4.2.5:
    /// `stop`->`stop`, `length`->`length`, `tool_calls`->`stop`, else `stop`.
    pub fn to_done_reason(self) -> &'static str {
        match self {
            UpstreamFinishReason::Length => "length",
            _ => "stop",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "tool_calls" => Self::ToolCalls,
            _ => Self::Other,
        }
    }
}

/// The complete result of a unary (non-streaming) chat-completion call.
#[derive(Debug, Clone)]
pub struct UpstreamChatResult {
    pub content: String,
    pub finish_reason: UpstreamFinishReason,
    pub usage: UpstreamUsage,
    pub tool_calls: Vec<crate::wire::ToolCall>,
}

/// The result of an embedding call.
#[derive(Debug, Clone)]
pub struct UpstreamEmbedResult {
    pub embedding: Vec<f32>,
}

/// One delta chunk from a streaming chat-completion call.
#[derive(Debug, Clone)]
pub struct UpstreamChatChunk {
    /// Incremental text, empty if this chunk carries only usage/finish data.
    pub delta: String,
    pub finish_reason: Option<UpstreamFinishReason>,
    /// Present only on the terminal chunk, when the backend includes it.
    pub usage: Option<UpstreamUsage>,
}
