//! Request-body validation shared by the generate/chat/embed handlers,
//! per spec §4.1 "Validation": `model` MUST be non-empty, `ChatRequest.
//! messages` MUST be non-empty, `EmbedRequest.prompt` MUST be non-empty.
//! Failures are a `GatewayError::RequestShape`, mapped to HTTP 400 by the
//! Error Mapper.

use gateway_core::error::GatewayError;
use gateway_core::wire::{ChatRequest, EmbedRequest, GenerateRequest};

pub fn validate_generate(req: &GenerateRequest) -> Result<(), GatewayError> {
    if req.model.trim().is_empty() {
        return Err(GatewayError::RequestShape("model is required".to_string()));
    }
    Ok(())
}

pub fn validate_chat(req: &ChatRequest) -> Result<(), GatewayError> {
    if req.model.trim().is_empty() {
        return Err(GatewayError::RequestShape("model is required".to_string()));
    }
    if req.messages.is_empty() {
        return Err(GatewayError::RequestShape("messages must not be empty".to_string()));
    }
    Ok(())
}

pub fn validate_embed(req: &EmbedRequest) -> Result<(), GatewayError> {
    if req.model.trim().is_empty() {
        return Err(GatewayError::RequestShape("model is required".to_string()));
    }
    if req.effective_prompt().trim().is_empty() {
        return Err(GatewayError::RequestShape("prompt is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn rejects_empty_model() {
        let req = GenerateRequest {
            model: "".to_string(),
            prompt: "hi".to_string(),
            stream: false,
            raw: false,
            format: None,
            system: None,
            template: None,
            context: None,
            options: HashMap::new(),
            keep_alive: None,
        };
        assert!(validate_generate(&req).is_err());
    }

    #[test]
    fn rejects_empty_messages() {
        let req = ChatRequest {
            model: "gpt-4".to_string(),
            messages: vec![],
            stream: false,
            format: None,
            options: HashMap::new(),
            tools: None,
            keep_alive: None,
        };
        assert!(validate_chat(&req).is_err());
    }

    #[test]
    fn rejects_empty_prompt() {
        let req = EmbedRequest { model: "m".to_string(), prompt: "".to_string(), input: None };
        assert!(validate_embed(&req).is_err());
    }

    #[test]
    fn accepts_well_formed_requests() {
        let req = EmbedRequest { model: "m".to_string(), prompt: "hi".to_string(), input: None };
        assert!(validate_embed(&req).is_ok());
    }
}
