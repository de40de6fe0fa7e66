use gateway_core::upstream::{ResponseFormatSpec, UpstreamChatParams, UpstreamMessage, UpstreamRole};
use gateway_core::wire::GenerateRequest;

use crate::options::map_options;

/// Converts a `GenerateRequest` into upstream chat-completion parameters,
/// per spec §4.2.2.
///
/// `template`, `raw`, and `context` are not representable against an
/// OpenAI-compatible backend; per spec they are accepted and silently
/// ignored rather than rejected — their presence never fails the request.
pub fn translate_generate(req: &GenerateRequest) -> UpstreamChatParams {
    let mut messages = Vec::with_capacity(2);

    if let Some(system) = req.system.as_ref().filter(|s| !s.is_empty()) {
        messages.push(UpstreamMessage {
            role: UpstreamRole::System,
            content: system.clone(),
            images: Vec::new(),
        });
    }

    messages.push(UpstreamMessage {
        role: UpstreamRole::User,
        content: req.prompt.clone(),
        images: Vec::new(),
    });

    let response_format = req.format.as_ref().and_then(response_format_from);

    UpstreamChatParams {
        model: req.model.clone(),
        messages,
        options: map_options(&req.options),
        response_format,
        tools: None,
        stream: req.stream,
    }
}

/// Interprets the polymorphic `format` field: the bare string `"json"`
/// requests JSON-object mode; any other JSON value is treated as a
/// structured-output schema and forwarded if the backend supports it,
/// dropped silently otherwise (spec §4.2.2).
pub(crate) fn response_format_from(format: &serde_json::Value) -> Option<ResponseFormatSpec> {
    match format {
        serde_json::Value::String(s) if s == "json" => Some(ResponseFormatSpec::JsonObject),
        serde_json::Value::Object(_) => Some(ResponseFormatSpec::JsonSchema(format.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_request() -> GenerateRequest {
        GenerateRequest {
            model: "gpt-3.5-turbo".to_string(),
            prompt: "Hi".to_string(),
            stream: true,
            raw: false,
            format: None,
            system: None,
            template: None,
            context: None,
            options: HashMap::new(),
            keep_alive: None,
        }
    }

    #[test]
    fn prompt_becomes_single_user_message() {
        let params = translate_generate(&base_request());
        assert_eq!(params.messages.len(), 1);
        assert!(matches!(params.messages[0].role, UpstreamRole::User));
        assert_eq!(params.messages[0].content, "Hi");
    }

    #[test]
    fn system_becomes_leading_message() {
        let mut req = base_request();
        req.system = Some("be terse".to_string());
        let params = translate_generate(&req);
        assert_eq!(params.messages.len(), 2);
        assert!(matches!(params.messages[0].role, UpstreamRole::System));
        assert!(matches!(params.messages[1].role, UpstreamRole::User));
    }

    #[test]
    fn template_raw_and_context_do_not_fail_translation() {
        let mut req = base_request();
        req.template = Some("{{ .Prompt }}".to_string());
        req.raw = true;
        req.context = Some(vec![1, 2, 3]);
        // Must still succeed; translate_generate is infallible.
        let params = translate_generate(&req);
        assert_eq!(params.messages.len(), 1);
    }

    #[test]
    fn json_format_string_sets_json_object_mode() {
        let mut req = base_request();
        req.format = Some(serde_json::json!("json"));
        let params = translate_generate(&req);
        assert!(matches!(params.response_format, Some(ResponseFormatSpec::JsonObject)));
    }

    #[test]
    fn json_schema_format_is_forwarded() {
        let mut req = base_request();
        req.format = Some(serde_json::json!({"type": "object"}));
        let params = translate_generate(&req);
        assert!(matches!(params.response_format, Some(ResponseFormatSpec::JsonSchema(_))));
    }
}
