use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Header, field or configuration key that caused the error (e.g., "x-amzn-RequestCharacters", "POLLY_REGION")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "synthesize_speech", "config")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Polly client.
///
/// Every failure of a client call lands in exactly one of these categories;
/// nothing is retried or swallowed before it reaches the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    /// Any non-200 answer from the service. `body` is the raw response text.
    #[error("Remote error: HTTP {status} {reason}: {body}")]
    Remote {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Decode error: {source}{}", format_context(.context))]
    Decode {
        #[source]
        source: serde_json::Error,
        context: ErrorContext,
    },

    /// A 200 response that lacks a header the result needs.
    #[error("Malformed response: {message}{}", format_context(.context))]
    MalformedResponse {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new malformed-response error with structured context
    pub fn malformed_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedResponse {
            message: msg.into(),
            context,
        }
    }

    pub fn decode_with_context(source: serde_json::Error, context: ErrorContext) -> Self {
        Error::Decode { source, context }
    }

    /// HTTP status of a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Decode { context, .. }
            | Error::MalformedResponse { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Short stable label for the error category, used in telemetry events.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration { .. } => "configuration",
            Error::Transport(_) => "transport",
            Error::Remote { .. } => "remote",
            Error::Decode { .. } => "decode",
            Error::MalformedResponse { .. } => "malformed_response",
            Error::Serialization(_) => "serialization",
        }
    }
}
