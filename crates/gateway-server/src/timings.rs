//! Approximates the prompt/eval split of a unary call's wall-clock time
//! for responses whose timing fields (spec §3 `GenerateFrame`/`ChatFrame`)
//! the upstream backend doesn't break down by phase. Matches the 25%/75%
//! split `gglib-proxy::ollama_handlers::non_streaming_chat_response` uses
//! for the same reason — `load_duration` is always 0 since this gateway
//! never loads a model itself.

use std::time::Duration;

use gateway_translate::response::Timings;

pub fn approximate(total: Duration) -> Timings {
    let total_nanos = total.as_nanos() as u64;
    Timings {
        total_duration: total_nanos,
        load_duration: 0,
        prompt_eval_duration: total_nanos / 4,
        eval_duration: total_nanos * 3 / 4,
    }
}
