//! 语音合成模块：通过签名请求调用 Polly 合成语音并列出可用音色。
//!
//! Speech synthesis and voice listing against the Polly REST endpoint.

mod client;
mod types;

pub use client::{PollyClient, PollyClientBuilder};
pub use types::{
    SpeechOptions, SpeechResult, Voice, VoiceOptions, VoicesResult, DEFAULT_OUTPUT_FORMAT,
    DEFAULT_VOICE_ID,
};
