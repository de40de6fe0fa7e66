use gateway_core::error::GatewayError;
use gateway_core::upstream::{UpstreamChatParams, UpstreamMessage, UpstreamRole};
use gateway_core::wire::{ChatRequest, ChatRole};

use crate::generate::response_format_from;
use crate::options::map_options;

fn map_role(role: &ChatRole) -> UpstreamRole {
    match role {
        ChatRole::System => UpstreamRole::System,
        ChatRole::User => UpstreamRole::User,
        ChatRole::Assistant => UpstreamRole::Assistant,
        ChatRole::Tool => UpstreamRole::Tool,
    }
}

/// Converts a `ChatRequest` into upstream chat-completion parameters, per
/// spec §4.2.3. Fails with a request-shape error only when a message
/// carries images and the caller hasn't told us the backend supports
/// multi-modal content (the single case §4.2.3 calls out as a hard error
/// rather than a silent drop).
pub fn translate_chat(req: &ChatRequest, images_supported: bool) -> Result<UpstreamChatParams, GatewayError> {
    let mut messages = Vec::with_capacity(req.messages.len());

    for msg in &req.messages {
        let has_images = msg.images.as_ref().is_some_and(|imgs| !imgs.is_empty());
        if has_images && !images_supported {
            return Err(GatewayError::RequestShape(
                "images not supported for this model".to_string(),
            ));
        }

        messages.push(UpstreamMessage {
            role: map_role(&msg.role),
            content: msg.content.clone(),
            images: msg.images.clone().unwrap_or_default(),
        });
    }

    let response_format = req.format.as_ref().and_then(response_format_from);

    let tools = req.tools.as_ref().map(|schemas| {
        schemas
            .iter()
            .map(|s| serde_json::to_value(s).unwrap_or(serde_json::Value::Null))
            .collect()
    });

    Ok(UpstreamChatParams {
        model: req.model.clone(),
        messages,
        options: map_options(&req.options),
        response_format,
        tools,
        stream: req.stream,
    })
}
