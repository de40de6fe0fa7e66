use gateway_core::upstream::UpstreamChatResult;
use gateway_core::wire::{ChatResponse, ChatResponseMessage, GenerateResponse};

use crate::timestamp::rfc3339_now;

/// Wall-clock/monotonic timings measured by the caller (Router or Stream
/// Adapter) around an upstream call, all in nanoseconds per spec §3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timings {
    pub total_duration: u64,
    pub load_duration: u64,
    pub prompt_eval_duration: u64,
    pub eval_duration: u64,
}

/// Assembles the unary `/api/generate` response, per spec §4.2.5.
pub fn build_generate_response(model: &str, result: &UpstreamChatResult, timings: Timings) -> GenerateResponse {
    GenerateResponse {
        model: model.to_string(),
        created_at: rfc3339_now(),
        response: result.content.clone(),
        done: true,
        done_reason: Some(result.finish_reason.to_done_reason().to_string()),
        context: None,
        total_duration: Some(timings.total_duration),
        load_duration: Some(timings.load_duration),
        prompt_eval_count: Some(result.usage.prompt_tokens),
        prompt_eval_duration: Some(timings.prompt_eval_duration),
        eval_count: Some(result.usage.completion_tokens),
        eval_duration: Some(timings.eval_duration),
    }
}

/// Assembles the unary `/api/chat` response, per spec §4.2.5. Identical to
/// `build_generate_response` except `response` becomes `message`, and any
/// upstream tool calls are attached verbatim.
pub fn build_chat_response(model: &str, result: &UpstreamChatResult, timings: Timings) -> ChatResponse {
    ChatResponse {
        model: model.to_string(),
        created_at: rfc3339_now(),
        message: ChatResponseMessage {
            role: "assistant".to_string(),
            content: result.content.clone(),
            tool_calls: if result.tool_calls.is_empty() {
                None
            } else {
                Some(result.tool_calls.clone())
            },
        },
        done: true,
        done_reason: Some(result.finish_reason.to_done_reason().to_string()),
        total_duration: Some(timings.total_duration),
        load_duration: Some(timings.load_duration),
        prompt_eval_count: Some(result.usage.prompt_tokens),
        prompt_eval_duration: Some(timings.prompt_eval_duration),
        eval_count: Some(result.usage.completion_tokens),
        eval_duration: Some(timings.eval_duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::upstream::{UpstreamFinishReason, UpstreamUsage};

    fn result(content: &str) -> UpstreamChatResult {
        UpstreamChatResult {
            content: content.to_string(),
            finish_reason: UpstreamFinishReason::Stop,
            usage: UpstreamUsage { prompt_tokens: 1, completion_tokens: 2 },
            tool_calls: Vec::new(),
        }
    }

    #[test]
    fn generate_response_matches_scenario_two() {
        let resp = build_generate_response(
            "gpt-3.5-turbo",
            &result("Hello!"),
            Timings { total_duration: 100, load_duration: 0, prompt_eval_duration: 10, eval_duration: 90 },
        );
        assert_eq!(resp.model, "gpt-3.5-turbo");
        assert_eq!(resp.response, "Hello!");
        assert!(resp.done);
        assert_eq!(resp.done_reason.as_deref(), Some("stop"));
        assert_eq!(resp.prompt_eval_count, Some(1));
        assert_eq!(resp.eval_count, Some(2));
        assert_eq!(resp.load_duration, Some(0));
    }

    #[test]
    fn chat_response_wraps_message() {
        let resp = build_chat_response("gpt-4", &result("Hi!"), Timings::default());
        assert_eq!(resp.message.role, "assistant");
        assert_eq!(resp.message.content, "Hi!");
        assert!(resp.done);
    }

    #[test]
    fn length_finish_reason_maps_to_length() {
        let mut r = result("partial");
        r.finish_reason = UpstreamFinishReason::Length;
        let resp = build_generate_response("m", &r, Timings::default());
        assert_eq!(resp.done_reason.as_deref(), Some("length"));
    }

    #[test]
    fn tool_calls_finish_reason_maps_to_stop() {
        let mut r = result("");
        r.finish_reason = UpstreamFinishReason::ToolCalls;
        let resp = build_generate_response("m", &r, Timings::default());
        assert_eq!(resp.done_reason.as_deref(), Some("stop"));
    }
}
