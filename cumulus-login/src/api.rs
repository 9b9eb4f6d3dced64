//! API types used during authentication.

use serde::{Deserialize, Serialize};

/// A successful response from the SSO token endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    /// The access token, a signed JWT.
    pub access_token: String,

    /// A rotated refresh token, if the server issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds. Informational, the token
    /// itself carries the authoritative `exp` claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,

    /// The token type, expected to be `Bearer`.
    pub token_type: String,

    /// The granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// The RFC 6749 error object returned by the token endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenErrorResponse {
    /// The error code, for example `invalid_grant`.
    pub error: String,

    /// Optional human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl std::fmt::Display for TokenErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{}: {}", self.error, description),
            None => f.write_str(&self.error),
        }
    }
}
