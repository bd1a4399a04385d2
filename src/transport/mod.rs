//! Signed HTTP transport: SigV4 signing plus buffered request execution.

mod http;
mod signer;

pub use http::{RawResponse, SignedTransport};
pub use signer::{Credentials, RequestSigner};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Transport error: {0}")]
    Other(String),
}
