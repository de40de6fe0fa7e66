//! Conversions between the upstream call shape (`gateway_core::upstream`)
//! and `async-openai`'s request/response types. Grounded on the message and
//! extraction helpers in `agent-network::client::LlmClient`, generalized to
//! the full multi-role, multi-modal, tool-calling shape this gateway needs.

use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPart, ChatCompletionRequestMessageContentPartImage,
    ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionResponseFormat,
    ChatCompletionResponseFormatType, CreateChatCompletionResponse, FinishReason, ImageUrl,
};
use gateway_core::error::GatewayError;
use gateway_core::upstream::{
    ResponseFormatSpec, UpstreamChatResult, UpstreamFinishReason, UpstreamMessage, UpstreamRole,
    UpstreamUsage,
};
use gateway_core::wire::ToolCall;

fn conversion_err(e: impl ToString) -> GatewayError {
    GatewayError::Internal(format!("failed to build upstream request: {}", e.to_string()))
}

/// Builds one `ChatCompletionRequestMessage` per upstream message, giving a
/// user message array-of-parts content when it carries images and plain
/// string content otherwise.
pub fn build_messages(
    messages: &[UpstreamMessage],
) -> Result<Vec<ChatCompletionRequestMessage>, GatewayError> {
    let mut out = Vec::with_capacity(messages.len());
    for (index, msg) in messages.iter().enumerate() {
        let built = match msg.role {
            UpstreamRole::System => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .map_err(conversion_err)?,
            ),
            UpstreamRole::Assistant => ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .map_err(conversion_err)?,
            ),
            UpstreamRole::Tool => ChatCompletionRequestMessage::Tool(
                ChatCompletionRequestToolMessageArgs::default()
                    .content(msg.content.clone())
                    .tool_call_id(format!("tool_call_{index}"))
                    .build()
                    .map_err(conversion_err)?,
            ),
            UpstreamRole::User if msg.images.is_empty() => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .map_err(conversion_err)?,
            ),
            UpstreamRole::User => {
                let mut parts = vec![ChatCompletionRequestMessageContentPart::Text(
                    ChatCompletionRequestMessageContentPartText { text: msg.content.clone() },
                )];
                for image in &msg.images {
                    parts.push(ChatCompletionRequestMessageContentPart::Image(
                        ChatCompletionRequestMessageContentPartImage {
                            image_url: ImageUrl {
                                url: format!("data:image/png;base64,{image}"),
                                detail: None,
                            },
                        },
                    ));
                }
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(ChatCompletionRequestUserMessageContent::Array(parts))
                        .build()
                        .map_err(conversion_err)?,
                )
            }
        };
        out.push(built);
    }
    Ok(out)
}

/// Maps a `ResponseFormatSpec` onto `async-openai`'s response-format type.
/// The pinned `async-openai` release only distinguishes `text` from
/// `json_object` on this struct, with no field to carry an embedded schema,
/// so a caller-supplied JSON schema degrades to plain `json_object` mode
/// rather than being dropped outright — it still constrains the backend to
/// valid JSON, which is the property Ollama's `format` field promises.
pub fn build_response_format(spec: &ResponseFormatSpec) -> ChatCompletionResponseFormat {
    let _ = spec;
    ChatCompletionResponseFormat { r#type: ChatCompletionResponseFormatType::JsonObject }
}

fn map_finish_reason(reason: Option<FinishReason>) -> UpstreamFinishReason {
    match reason {
        Some(FinishReason::Stop) => UpstreamFinishReason::Stop,
        Some(FinishReason::Length) => UpstreamFinishReason::Length,
        Some(FinishReason::ToolCalls) => UpstreamFinishReason::ToolCalls,
        _ => UpstreamFinishReason::Other,
    }
}

/// Extracts a `UpstreamChatResult` out of a unary chat-completion response.
pub fn extract_chat_result(response: CreateChatCompletionResponse) -> Result<UpstreamChatResult, GatewayError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::UpstreamFatal)?;

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall {
            id: Some(tc.id),
            call_type: "function".to_string(),
            function: gateway_core::wire::ToolCallFunction {
                name: tc.function.name,
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments)),
            },
        })
        .collect();

    let usage = response
        .usage
        .map(|u| UpstreamUsage { prompt_tokens: u.prompt_tokens, completion_tokens: u.completion_tokens })
        .unwrap_or_default();

    Ok(UpstreamChatResult {
        content: choice.message.content.unwrap_or_default(),
        finish_reason: map_finish_reason(choice.finish_reason),
        usage,
        tool_calls,
    })
}

/// Classifies an `async-openai` error into the gateway's failure taxonomy,
/// per the status-code table in spec §4.6. `model` is the identifier the
/// caller requested, threaded through so a 404 carries the actual offending
/// id rather than a placeholder (`GatewayError::NotFound`'s text is
/// `"model '<id>' not found"`).
pub fn classify_error(err: &OpenAIError, model: &str) -> GatewayError {
    match err {
        OpenAIError::Reqwest(e) => match e.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => GatewayError::Authentication,
            Some(404) => GatewayError::NotFound(model.to_string()),
            Some(429) => GatewayError::RateLimit,
            Some(status) if status >= 500 => GatewayError::UpstreamTransient,
            Some(_) => GatewayError::UpstreamFatal,
            None if e.is_timeout() => GatewayError::Timeout,
            None if e.is_connect() => GatewayError::UpstreamTransient,
            None => GatewayError::UpstreamFatal,
        },
        OpenAIError::ApiError(api_err) => {
            let message = api_err.message.to_ascii_lowercase();
            if message.contains("rate limit") || message.contains("quota") {
                GatewayError::RateLimit
            } else if message.contains("not found") || message.contains("does not exist") {
                GatewayError::NotFound(model.to_string())
            } else if message.contains("invalid") || message.contains("unsupported") {
                GatewayError::RequestShape(api_err.message.clone())
            } else {
                GatewayError::UpstreamFatal
            }
        }
        OpenAIError::StreamError(_) => GatewayError::UpstreamTransient,
        _ => GatewayError::UpstreamFatal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::upstream::UpstreamRole;

    #[test]
    fn builds_plain_text_user_message_without_images() {
        let messages = vec![UpstreamMessage { role: UpstreamRole::User, content: "hi".to_string(), images: vec![] }];
        let built = build_messages(&messages).unwrap();
        assert_eq!(built.len(), 1);
        assert!(matches!(built[0], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn builds_array_content_when_images_present() {
        let messages = vec![UpstreamMessage {
            role: UpstreamRole::User,
            content: "describe this".to_string(),
            images: vec!["YWJj".to_string()],
        }];
        let built = build_messages(&messages).unwrap();
        assert_eq!(built.len(), 1);
    }

    #[test]
    fn json_object_format_requests_json_object_type() {
        let format = build_response_format(&ResponseFormatSpec::JsonObject);
        assert!(matches!(format.r#type, ChatCompletionResponseFormatType::JsonObject));
    }

    #[test]
    fn json_schema_format_degrades_to_json_object_type() {
        let value = serde_json::json!({"type": "object"});
        let format = build_response_format(&ResponseFormatSpec::JsonSchema(value));
        assert!(matches!(format.r#type, ChatCompletionResponseFormatType::JsonObject));
    }
}
