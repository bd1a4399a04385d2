//! Polly client: signed synthesis and voice-listing calls.

use super::types::{SpeechOptions, SpeechResult, VoiceOptions, VoicesResult};
use crate::config::{ClientConfig, SPEECH_PATH, VOICES_PATH};
use crate::telemetry::{self, CallEvent, CallSink, Operation};
use crate::transport::{Credentials, RawResponse, SignedTransport};
use crate::{Error, ErrorContext, Result};
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Header carrying the processed-character count.
const REQUEST_CHARACTERS_HEADER: &str = "x-amzn-RequestCharacters";
const CONTENT_TYPE_HEADER: &str = "content-type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the Polly speech endpoints.
///
/// Holds the credential pair and configuration immutably; one instance can
/// serve concurrent calls.
pub struct PollyClient {
    transport: SignedTransport,
    config: ClientConfig,
    sink: Arc<dyn CallSink>,
}

impl PollyClient {
    /// Client with the default configuration. No network activity.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::builder().credentials(access_key, secret_key).build()
    }

    pub fn builder() -> PollyClientBuilder {
        PollyClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Synthesize `options.text` and return the full audio payload.
    ///
    /// Text length is not checked here; the service rejects oversized input
    /// with a 400, surfaced as [`Error::Remote`].
    pub async fn synthesize_speech(&self, options: &SpeechOptions) -> Result<SpeechResult> {
        let started = Instant::now();
        let result = self.do_synthesize_speech(options).await;
        self.report(Operation::SynthesizeSpeech, started, result).await
    }

    /// Returns the result together with the buffered body length.
    async fn do_synthesize_speech(&self, options: &SpeechOptions) -> Result<(SpeechResult, usize)> {
        let body = serde_json::to_vec(options)?;
        tracing::debug!(
            voice_id = %options.voice_id,
            output_format = %options.output_format,
            text_len = options.text.len(),
            "synthesizing speech"
        );

        let response = self
            .transport
            .send(
                Method::POST,
                &self.config.endpoint(SPEECH_PATH),
                &[(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)],
                body,
            )
            .await?;
        let response = ensure_ok(response)?;

        let request_id = required_header(&response, REQUEST_CHARACTERS_HEADER, "synthesize_speech")?;
        let content_type = required_header(&response, CONTENT_TYPE_HEADER, "synthesize_speech")?;

        let result = SpeechResult {
            audio: response.body.to_vec(),
            request_id,
            content_type,
        };
        Ok((result, response.body.len()))
    }

    /// Fetch one page of available voices.
    ///
    /// `options` is accepted for API stability but its filter and token are
    /// not transmitted: the service always returns its first page here.
    pub async fn describe_voices(&self, options: Option<&VoiceOptions>) -> Result<VoicesResult> {
        let started = Instant::now();
        let result = self.do_describe_voices(options).await;
        self.report(Operation::DescribeVoices, started, result).await
    }

    async fn do_describe_voices(
        &self,
        options: Option<&VoiceOptions>,
    ) -> Result<(VoicesResult, usize)> {
        if let Some(opts) = options.filter(|o| !o.is_empty()) {
            tracing::debug!(
                language_code = opts.language_code.as_deref(),
                has_next_token = opts.next_token.is_some(),
                "voice filter and continuation token are not forwarded"
            );
        }

        let response = self
            .transport
            .send(
                Method::GET,
                &self.config.endpoint(VOICES_PATH),
                &[(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)],
                Vec::new(),
            )
            .await?;
        let response = ensure_ok(response)?;

        let voices = serde_json::from_slice::<VoicesResult>(&response.body).map_err(|e| {
            Error::decode_with_context(
                e,
                ErrorContext::new()
                    .with_source("describe_voices")
                    .with_details(format!("{} byte body", response.body.len())),
            )
        })?;
        Ok((voices, response.body.len()))
    }

    /// Emit one call event and strip the body length from the result.
    async fn report<T>(
        &self,
        operation: Operation,
        started: Instant,
        result: Result<(T, usize)>,
    ) -> Result<T> {
        let duration_ms = elapsed_ms(started.elapsed());
        let event = match &result {
            Ok((_, bytes)) => {
                CallEvent::success(operation, StatusCode::OK.as_u16(), *bytes, duration_ms)
            }
            Err(e) => CallEvent::failure(operation, e, duration_ms),
        };
        if let Err(e) = self.sink.report(event).await {
            tracing::warn!(operation = operation.as_str(), error = %e, "call sink rejected event");
        }
        result.map(|(value, _)| value)
    }
}

fn ensure_ok(response: RawResponse) -> Result<RawResponse> {
    if response.status != StatusCode::OK {
        tracing::debug!(status = response.status.as_u16(), "non-200 response");
        return Err(Error::Remote {
            status: response.status.as_u16(),
            reason: response.reason().to_string(),
            body: response.body_text(),
        });
    }
    Ok(response)
}

fn required_header(response: &RawResponse, name: &str, source: &str) -> Result<String> {
    response.header(name).map(str::to_string).ok_or_else(|| {
        Error::malformed_with_context(
            format!("missing response header {}", name),
            ErrorContext::new().with_field_path(name).with_source(source),
        )
    })
}

fn elapsed_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

pub struct PollyClientBuilder {
    credentials: Option<Credentials>,
    config: Option<ClientConfig>,
    base_url: Option<String>,
    region: Option<String>,
    timeout: Option<Duration>,
    sink: Arc<dyn CallSink>,
}

impl PollyClientBuilder {
    pub fn new() -> Self {
        Self {
            credentials: None,
            config: None,
            base_url: None,
            region: None,
            timeout: None,
            sink: telemetry::noop_sink(),
        }
    }

    pub fn credentials(mut self, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(access_key, secret_key));
        self
    }

    /// Start from a complete configuration; later overrides still apply.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override base URL (primarily for testing with mock servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Signing region. The endpoint moves to the region's public URL unless
    /// [`base_url`](Self::base_url) is also set.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Inject a call sink. Default is a no-op sink.
    pub fn call_sink(mut self, sink: Arc<dyn CallSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> Result<PollyClient> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::configuration("Credentials must be specified"))?;

        let mut config = self.config.unwrap_or_default();
        if let Some(region) = self.region {
            config = config.with_region(region)?;
        }
        if let Some(url) = self.base_url {
            config = config.with_base_url(&url)?;
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        let transport = SignedTransport::new(&credentials, &config)?;
        Ok(PollyClient {
            transport,
            config,
            sink: self.sink,
        })
    }
}

impl Default for PollyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
