//! The Stream Adapter: converts an asynchronous sequence of upstream delta
//! chunks into a lazy sequence of Ollama frames, accumulating token counts
//! and wall-clock timings along the way and emitting exactly one terminal
//! frame (spec §4.3).
//!
//! One-for-one pull semantics: this adapter holds no internal buffer beyond
//! the single in-flight chunk it is currently mapping, so it never pulls
//! ahead of its own consumer (spec §4.3 "Backpressure").

use std::time::Instant;

use futures::Stream;
use gateway_core::error::GatewayError;
use gateway_core::upstream::UpstreamChatChunk;
use gateway_core::wire::{ChatFrame, ChatResponseMessage, GenerateFrame};
use gateway_translate::timestamp::rfc3339_now;

/// Which Ollama endpoint's frame shape to emit: `/api/generate` carries a
/// flat `response` string, `/api/chat` wraps it in `message.content`
/// (invariants I4/I5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Generate,
    Chat,
}

/// A single frame in a streaming response, already in the shape its
/// endpoint requires. `to_ndjson_line` is the only place a frame becomes
/// bytes — one JSON object followed by `\n`, never an SSE `data:` prefix
/// (spec §4.3 "Framing").
#[derive(Debug, Clone)]
pub enum OllamaFrame {
    Generate(GenerateFrame),
    Chat(ChatFrame),
}

impl OllamaFrame {
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        let mut line = match self {
            OllamaFrame::Generate(frame) => serde_json::to_string(frame)?,
            OllamaFrame::Chat(frame) => serde_json::to_string(frame)?,
        };
        line.push('\n');
        Ok(line)
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            OllamaFrame::Generate(f) => f.done,
            OllamaFrame::Chat(f) => f.done,
        }
    }
}

fn make_frame(kind: FrameKind, model: &str, content: String, done: bool) -> OllamaFrame {
    match kind {
        FrameKind::Generate => OllamaFrame::Generate(GenerateFrame {
            model: model.to_string(),
            created_at: rfc3339_now(),
            response: content,
            done,
            done_reason: None,
            context: None,
            total_duration: None,
            load_duration: None,
            prompt_eval_count: None,
            prompt_eval_duration: None,
            eval_count: None,
            eval_duration: None,
        }),
        FrameKind::Chat => OllamaFrame::Chat(ChatFrame {
            model: model.to_string(),
            created_at: rfc3339_now(),
            message: ChatResponseMessage { role: "assistant".to_string(), content, tool_calls: None },
            done,
            done_reason: None,
            total_duration: None,
            load_duration: None,
            prompt_eval_count: None,
            prompt_eval_duration: None,
            eval_count: None,
            eval_duration: None,
        }),
    }
}

fn finalize_terminal(frame: &mut OllamaFrame, done_reason: &str, timings: Timings, prompt_eval_count: u32, eval_count: u32) {
    match frame {
        OllamaFrame::Generate(f) => {
            f.done_reason = Some(done_reason.to_string());
            f.total_duration = Some(timings.total_duration);
            f.load_duration = Some(timings.load_duration);
            f.prompt_eval_count = Some(prompt_eval_count);
            f.prompt_eval_duration = Some(timings.prompt_eval_duration);
            f.eval_count = Some(eval_count);
            f.eval_duration = Some(timings.eval_duration);
        }
        OllamaFrame::Chat(f) => {
            f.done_reason = Some(done_reason.to_string());
            f.total_duration = Some(timings.total_duration);
            f.load_duration = Some(timings.load_duration);
            f.prompt_eval_count = Some(prompt_eval_count);
            f.prompt_eval_duration = Some(timings.prompt_eval_duration);
            f.eval_count = Some(eval_count);
            f.eval_duration = Some(timings.eval_duration);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Timings {
    total_duration: u64,
    load_duration: u64,
    prompt_eval_duration: u64,
    eval_duration: u64,
}

/// Converts an upstream delta-chunk stream into a lazy sequence of Ollama
/// frames, per spec §4.3. `load_duration` is always reported as 0 — the
/// gateway never loads a model itself, so there is nothing else to measure.
pub fn adapt_stream(
    model: String,
    kind: FrameKind,
    upstream: impl Stream<Item = Result<UpstreamChatChunk, GatewayError>> + Send + 'static,
) -> impl Stream<Item = Result<OllamaFrame, GatewayError>> {
    async_stream::try_stream! {
        futures::pin_mut!(upstream);

        let t0 = Instant::now();
        let mut t_prompt_done: Option<Instant> = None;
        let mut eval_count: u32 = 0;
        let mut prompt_eval_count: u32 = 0;
        let mut done_reason = "stop".to_string();

        while let Some(chunk) = futures::StreamExt::next(&mut upstream).await {
            let chunk = chunk?;

            if !chunk.delta.is_empty() {
                if t_prompt_done.is_none() {
                    t_prompt_done = Some(Instant::now());
                }
                yield make_frame(kind, &model, chunk.delta.clone(), false);
            }

            if let Some(usage) = chunk.usage {
                prompt_eval_count = usage.prompt_tokens;
                eval_count = usage.completion_tokens;
            }

            if let Some(reason) = chunk.finish_reason {
                done_reason = reason.to_done_reason().to_string();
                break;
            }
        }

        let prompt_done = t_prompt_done.unwrap_or(t0);
        let now = Instant::now();
        let timings = Timings {
            total_duration: now.saturating_duration_since(t0).as_nanos() as u64,
            load_duration: 0,
            prompt_eval_duration: prompt_done.saturating_duration_since(t0).as_nanos() as u64,
            eval_duration: now.saturating_duration_since(prompt_done).as_nanos() as u64,
        };

        let mut terminal = make_frame(kind, &model, String::new(), true);
        finalize_terminal(&mut terminal, &done_reason, timings, prompt_eval_count, eval_count);
        yield terminal;
    }
}
