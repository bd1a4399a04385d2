//! Request and response types for the speech and voice-listing calls.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3";
pub const DEFAULT_VOICE_ID: &str = "Joanna";

/// Parameters of a synthesis call. Serialized as
/// `{"OutputFormat": .., "Text": .., "VoiceId": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpeechOptions {
    pub output_format: String,
    pub text: String,
    pub voice_id: String,
}

impl SpeechOptions {
    /// Default options for `text`: mp3 output, voice "Joanna".
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            text: text.into(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
        }
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }
}

/// Audio returned by a synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResult {
    pub audio: Vec<u8>,
    /// Value of the `x-amzn-RequestCharacters` header: the number of
    /// characters the service synthesized. The field name does not match the
    /// header; the service documentation disagrees with the header it sends.
    pub request_id: String,
    pub content_type: String,
}

impl SpeechResult {
    pub fn characters_processed(&self) -> Option<u64> {
        self.request_id.trim().parse().ok()
    }
}

/// Filter and continuation token for a voice listing.
///
/// Neither field is sent to the service yet; callers paging through voices
/// get the first page on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceOptions {
    pub language_code: Option<String>,
    pub next_token: Option<String>,
}

impl VoiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = Some(code.into());
        self
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.language_code.is_none() && self.next_token.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voice {
    pub gender: String,
    pub id: String,
    pub language_code: String,
    pub language_name: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_language_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supported_engines: Vec<String>,
}

/// One page of the voice listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoicesResult {
    /// Empty when there are no further pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub voices: Vec<Voice>,
}

impl VoicesResult {
    pub fn has_more(&self) -> bool {
        !self.next_token.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
