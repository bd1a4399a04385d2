//! AWS Signature Version 4 request signing.
//!
//! Canonicalisation and HMAC derivation are done by `aws-sigv4`; this module
//! only adapts our request parts to its signable form and hands back the
//! headers to attach.

use super::TransportError;
use aws_credential_types::Credentials as AwsCredentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use std::fmt;
use std::time::SystemTime;

/// Access-key / secret-key pair. Immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"** redacted **")
            .finish()
    }
}

/// Signs requests for one region/service scope.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    identity: Identity,
    region: String,
    service_name: String,
}

impl RequestSigner {
    pub fn new(
        credentials: &Credentials,
        region: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        let identity: Identity = AwsCredentials::new(
            credentials.access_key(),
            credentials.secret_key(),
            None,
            None,
            "polly-speech",
        )
        .into();
        Self {
            identity,
            region: region.into(),
            service_name: service_name.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Compute the signing headers (`authorization`, `x-amz-date`, ...) for
    /// a request. `headers` must contain every header that will be sent and
    /// should be covered by the signature.
    pub fn sign(
        &self,
        method: &str,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
        time: SystemTime,
    ) -> Result<Vec<(String, String)>, TransportError> {
        let params = v4::SigningParams::builder()
            .identity(&self.identity)
            .region(&self.region)
            .name(&self.service_name)
            .time(time)
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| TransportError::Signing(e.to_string()))?
            .into();

        let signable = SignableRequest::new(
            method,
            url,
            headers.iter().copied(),
            SignableBody::Bytes(body),
        )
        .map_err(|e| TransportError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| TransportError::Signing(e.to_string()))?
            .into_parts();

        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}
