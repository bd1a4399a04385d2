//! # polly-speech
//!
//! 这是 Amazon Polly 文字转语音 API 的轻量 Rust 客户端：签名请求、合成语音、列出音色。
//!
//! Minimal async client binding for the Amazon Polly text-to-speech REST API.
//!
//! ## Overview
//!
//! Each client call is a single AWS Signature Version 4 signed HTTP round-trip:
//! build payload, sign and send, buffer the full body, validate the status and
//! decode into a typed result. There is no retry, caching or pagination loop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polly_speech::{PollyClient, SpeechOptions};
//!
//! #[tokio::main]
//! async fn main() -> polly_speech::Result<()> {
//!     let client = PollyClient::new("AWS_ACCESS_KEY", "AWS_SECRET_KEY")?;
//!
//!     let voices = client.describe_voices(None).await?;
//!     println!("{} voices", voices.voices.len());
//!
//!     let speech = client
//!         .synthesize_speech(&SpeechOptions::new("Hello this is Polly"))
//!         .await?;
//!     println!("{} bytes of {}", speech.audio.len(), speech.content_type);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`speech`] | `PollyClient`, options and result types |
//! | [`config`] | Endpoint, region and HTTP settings |
//! | [`transport`] | SigV4 signing and buffered HTTP execution |
//! | [`telemetry`] | Injectable per-call event sinks |
//! | [`error`] | Unified error type |

pub mod config;
pub mod speech;
pub mod telemetry;
pub mod transport;

pub use config::ClientConfig;
pub use speech::{
    PollyClient, PollyClientBuilder, SpeechOptions, SpeechResult, Voice, VoiceOptions,
    VoicesResult,
};
pub use telemetry::{CallEvent, CallSink};
pub use transport::Credentials;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
