//! The Upstream Client: the only part of the gateway that performs network
//! I/O. Wraps `async-openai`'s `Client<OpenAIConfig>`, grounded on
//! `agent-network::client::LlmClient`, and adds the retry, timeout, and
//! pooling behavior spec §4.4 asks of a gateway rather than a single-shot
//! agent call.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionStreamOptions, CreateChatCompletionRequestArgs, CreateEmbeddingRequestArgs,
    EmbeddingInput,
};
use async_openai::Client;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use gateway_config::Config;
use gateway_core::error::GatewayError;
use gateway_core::upstream::{
    UpstreamChatChunk, UpstreamChatParams, UpstreamChatResult, UpstreamEmbedParams,
    UpstreamEmbedResult, UpstreamModelInfo, UpstreamUsage,
};

use crate::convert::{build_messages, build_response_format, classify_error, extract_chat_result};
use crate::retry::with_retry;

/// The capability interface the Router and Translator call through. A real
/// implementation talks to an OpenAI-compatible backend; tests substitute a
/// hand-written fake rather than mocking this trait.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn list_models(&self) -> Result<Vec<UpstreamModelInfo>, GatewayError>;

    async fn chat(&self, params: &UpstreamChatParams) -> Result<UpstreamChatResult, GatewayError>;

    async fn chat_stream(
        &self,
        params: &UpstreamChatParams,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<UpstreamChatChunk, GatewayError>> + Send>>, GatewayError>;

    async fn embed(&self, params: &UpstreamEmbedParams) -> Result<UpstreamEmbedResult, GatewayError>;

    /// Total upstream calls attempted, for the `/health` liveness surface.
    fn request_count(&self) -> u64;
    /// Total upstream calls that ultimately failed (after exhausting retries).
    fn error_count(&self) -> u64;
}

/// The production `UpstreamClient`, talking to an OpenAI-compatible backend
/// over a pooled `reqwest::Client`.
pub struct OpenAiUpstreamClient {
    client: Client<OpenAIConfig>,
    request_timeout: Duration,
    stream_timeout: Duration,
    request_count: AtomicU64,
    error_count: AtomicU64,
}

impl OpenAiUpstreamClient {
    /// `async-openai`'s default client already pools and reuses its
    /// underlying `reqwest::Client` connections across calls (spec §4.4's
    /// connection-pooling requirement); we configure only the endpoint and
    /// credential, not a replacement HTTP transport.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let openai_config = OpenAIConfig::new()
            .with_api_base(&config.api_base_url)
            .with_api_key(&config.api_key);

        Ok(Self {
            client: Client::with_config(openai_config),
            request_timeout: config.request_timeout,
            stream_timeout: config.stream_timeout,
            request_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
        })
    }

    fn record_attempt(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    fn build_chat_request(
        &self,
        params: &UpstreamChatParams,
        stream: bool,
    ) -> Result<async_openai::types::CreateChatCompletionRequest, GatewayError> {
        let messages = build_messages(&params.messages)?;
        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&params.model).messages(messages);

        if let Some(temperature) = params.options.temperature {
            builder.temperature(temperature);
        }
        if let Some(top_p) = params.options.top_p {
            builder.top_p(top_p);
        }
        if let Some(seed) = params.options.seed {
            builder.seed(seed);
        }
        if let Some(max_tokens) = params.options.max_tokens {
            builder.max_tokens(max_tokens);
        }
        if let Some(stop) = &params.options.stop {
            builder.stop(stop.clone());
        }
        if let Some(frequency_penalty) = params.options.frequency_penalty {
            builder.frequency_penalty(frequency_penalty);
        }
        if let Some(presence_penalty) = params.options.presence_penalty {
            builder.presence_penalty(presence_penalty);
        }
        if let Some(format) = &params.response_format {
            builder.response_format(build_response_format(format));
        }
        if stream {
            builder.stream(true);
            builder.stream_options(ChatCompletionStreamOptions { include_usage: true });
        }

        builder
            .build()
            .map_err(|e| GatewayError::Internal(format!("failed to build chat request: {e}")))
    }
}

#[async_trait]
impl UpstreamClient for OpenAiUpstreamClient {
    async fn list_models(&self) -> Result<Vec<UpstreamModelInfo>, GatewayError> {
        self.record_attempt();
        let result = with_retry(|_attempt| async {
            tokio::time::timeout(self.request_timeout, self.client.models().list())
                .await
                .map_err(|_| GatewayError::Timeout)?
                .map_err(|e| classify_error(&e, ""))
        })
        .await;

        if result.is_err() {
            self.record_error();
        }

        result.map(|response| {
            response
                .data
                .into_iter()
                .map(|m| UpstreamModelInfo { id: m.id, created: m.created as i64 })
                .collect()
        })
    }

    async fn chat(&self, params: &UpstreamChatParams) -> Result<UpstreamChatResult, GatewayError> {
        self.record_attempt();
        let request = self.build_chat_request(params, false)?;

        let model = params.model.clone();
        let result = with_retry(|_attempt| {
            let request = request.clone();
            let model = model.clone();
            async move {
                tokio::time::timeout(self.request_timeout, self.client.chat().create(request))
                    .await
                    .map_err(|_| GatewayError::Timeout)?
                    .map_err(|e| classify_error(&e, &model))
            }
        })
        .await;

        if result.is_err() {
            self.record_error();
        }

        result.and_then(extract_chat_result)
    }

    async fn chat_stream(
        &self,
        params: &UpstreamChatParams,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<UpstreamChatChunk, GatewayError>> + Send>>, GatewayError> {
        self.record_attempt();
        let request = self.build_chat_request(params, true)?;

        // Retries apply only to establishing the stream, never once bytes
        // have started arriving (spec §4.4 "Streaming retries").
        let model = params.model.clone();
        let opened = with_retry(|_attempt| {
            let request = request.clone();
            let model = model.clone();
            async move {
                tokio::time::timeout(self.request_timeout, self.client.chat().create_stream(request))
                    .await
                    .map_err(|_| GatewayError::Timeout)?
                    .map_err(|e| classify_error(&e, &model))
            }
        })
        .await;

        let stream = match opened {
            Ok(stream) => stream,
            Err(e) => {
                self.record_error();
                return Err(e);
            }
        };

        let deadline = self.stream_timeout;
        let model = model.clone();
        let mapped = stream.filter_map(move |result| {
            let model = model.clone();
            async move {
                match result {
                    Ok(response) => {
                        let choice = response.choices.first();
                        let delta = choice.and_then(|c| c.delta.content.clone()).unwrap_or_default();
                        let finish_reason = choice.and_then(|c| c.finish_reason).map(|r| match r {
                            async_openai::types::FinishReason::Stop => {
                                gateway_core::upstream::UpstreamFinishReason::Stop
                            }
                            async_openai::types::FinishReason::Length => {
                                gateway_core::upstream::UpstreamFinishReason::Length
                            }
                            async_openai::types::FinishReason::ToolCalls => {
                                gateway_core::upstream::UpstreamFinishReason::ToolCalls
                            }
                            _ => gateway_core::upstream::UpstreamFinishReason::Other,
                        });
                        let usage = response.usage.map(|u| UpstreamUsage {
                            prompt_tokens: u.prompt_tokens,
                            completion_tokens: u.completion_tokens,
                        });

                        if delta.is_empty() && finish_reason.is_none() && usage.is_none() {
                            return None;
                        }
                        Some(Ok(UpstreamChatChunk { delta, finish_reason, usage }))
                    }
                    Err(e) => Some(Err(classify_error(&e, &model))),
                }
            }
        });

        let bounded = timeout_bounded(mapped, deadline);
        Ok(Box::pin(bounded))
    }

    async fn embed(&self, params: &UpstreamEmbedParams) -> Result<UpstreamEmbedResult, GatewayError> {
        self.record_attempt();
        let request = CreateEmbeddingRequestArgs::default()
            .model(&params.model)
            .input(EmbeddingInput::String(params.input.clone()))
            .build()
            .map_err(|e| GatewayError::Internal(format!("failed to build embed request: {e}")))?;

        let model = params.model.clone();
        let result = with_retry(|_attempt| {
            let request = request.clone();
            let model = model.clone();
            async move {
                tokio::time::timeout(self.request_timeout, self.client.embeddings().create(request))
                    .await
                    .map_err(|_| GatewayError::Timeout)?
                    .map_err(|e| classify_error(&e, &model))
            }
        })
        .await;

        if result.is_err() {
            self.record_error();
        }

        result.map(|response| UpstreamEmbedResult {
            embedding: response.data.into_iter().next().map(|d| d.embedding).unwrap_or_default(),
        })
    }

    fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }
}

/// Wraps a chunk stream so the whole stream aborts with `GatewayError::Timeout`
/// once `deadline` elapses from first poll, rather than resetting on every
/// chunk the way a naive `tokio::time::timeout`-per-item would.
fn timeout_bounded<S>(
    inner: S,
    deadline: Duration,
) -> impl Stream<Item = Result<UpstreamChatChunk, GatewayError>>
where
    S: Stream<Item = Result<UpstreamChatChunk, GatewayError>> + Send + 'static,
{
    async_stream::try_stream! {
        futures::pin_mut!(inner);
        let sleep = tokio::time::sleep(deadline);
        futures::pin_mut!(sleep);

        loop {
            tokio::select! {
                next = inner.next() => {
                    match next {
                        Some(item) => yield item?,
                        None => break,
                    }
                }
                _ = &mut sleep => {
                    Err(GatewayError::Timeout)?;
                }
            }
        }
    }
}
