//! Call telemetry: an injectable sink receiving one event per client call.
//!
//! The client never prints. Applications that want per-call records plug a
//! [`CallSink`] into the builder; the default is [`NoopCallSink`].
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CallEvent`] | Outcome, status and timing of one call |
//! | [`CallSink`] | Trait for event destinations |
//! | [`NoopCallSink`] | Default no-op sink |
//! | [`TracingCallSink`] | Emits events as `tracing` records |
//! | [`InMemoryCallSink`] | In-memory sink for testing |
//! | [`CompositeCallSink`] | Multi-destination composite sink |

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

fn timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SynthesizeSpeech,
    DescribeVoices,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SynthesizeSpeech => "synthesize_speech",
            Self::DescribeVoices => "describe_voices",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEvent {
    pub operation: Operation,
    pub outcome: Outcome,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Buffered response body size.
    pub bytes: Option<usize>,
    pub duration_ms: u64,
    /// `Error::kind` of a failed call.
    pub error_kind: Option<String>,
    pub timestamp: f64,
}

impl CallEvent {
    pub fn success(operation: Operation, status: u16, bytes: usize, duration_ms: u64) -> Self {
        Self {
            operation,
            outcome: Outcome::Success,
            status: Some(status),
            bytes: Some(bytes),
            duration_ms,
            error_kind: None,
            timestamp: timestamp(),
        }
    }

    pub fn failure(operation: Operation, error: &crate::Error, duration_ms: u64) -> Self {
        Self {
            operation,
            outcome: Outcome::Failure,
            status: error.status(),
            bytes: None,
            duration_ms,
            error_kind: Some(error.kind().to_string()),
            timestamp: timestamp(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

#[async_trait]
pub trait CallSink: Send + Sync {
    async fn report(&self, event: CallEvent) -> Result<()>;
}

pub struct NoopCallSink;

#[async_trait]
impl CallSink for NoopCallSink {
    async fn report(&self, _event: CallEvent) -> Result<()> {
        Ok(())
    }
}

pub fn noop_sink() -> Arc<dyn CallSink> {
    Arc::new(NoopCallSink)
}

/// Emits every event as a structured `tracing` record under the
/// `polly_speech::calls` target.
#[derive(Default)]
pub struct TracingCallSink;

#[async_trait]
impl CallSink for TracingCallSink {
    async fn report(&self, event: CallEvent) -> Result<()> {
        match event.outcome {
            Outcome::Success => tracing::info!(
                target: "polly_speech::calls",
                operation = event.operation.as_str(),
                status = event.status,
                bytes = event.bytes,
                duration_ms = event.duration_ms,
                "call succeeded"
            ),
            Outcome::Failure => tracing::warn!(
                target: "polly_speech::calls",
                operation = event.operation.as_str(),
                status = event.status,
                error_kind = event.error_kind.as_deref(),
                duration_ms = event.duration_ms,
                "call failed"
            ),
        }
        Ok(())
    }
}

/// In-memory sink for testing.
pub struct InMemoryCallSink {
    events: Arc<RwLock<Vec<CallEvent>>>,
    max_events: usize,
}

impl InMemoryCallSink {
    pub fn new(max: usize) -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            max_events: max,
        }
    }
    pub fn get_events(&self) -> Vec<CallEvent> {
        self.events.read().map(|e| e.clone()).unwrap_or_default()
    }
    pub fn get_events_by_operation(&self, operation: Operation) -> Vec<CallEvent> {
        self.get_events()
            .into_iter()
            .filter(|e| e.operation == operation)
            .collect()
    }
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }
    pub fn len(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CallSink for InMemoryCallSink {
    async fn report(&self, event: CallEvent) -> Result<()> {
        if let Ok(mut events) = self.events.write() {
            events.push(event);
            if events.len() > self.max_events {
                events.remove(0);
            }
        }
        Ok(())
    }
}

/// Composite sink for multiple destinations.
pub struct CompositeCallSink {
    sinks: Vec<Arc<dyn CallSink>>,
}

impl CompositeCallSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }
    pub fn add_sink(mut self, sink: Arc<dyn CallSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl Default for CompositeCallSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CallSink for CompositeCallSink {
    async fn report(&self, event: CallEvent) -> Result<()> {
        for s in &self.sinks {
            let _ = s.report(event.clone()).await;
        }
        Ok(())
    }
}
