//! Error types.

use std::fmt;

/// Access token parsing error.
#[derive(Clone, Copy, Debug)]
pub struct TokenError;

impl std::error::Error for TokenError {}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid access token")
    }
}

/// Error parsing a token endpoint response.
#[derive(Debug)]
pub enum ResponseError {
    /// An error happened when decoding the JSON response.
    Json(serde_json::Error),

    /// Some unexpected error occurred.
    Msg(&'static str),

    /// The token endpoint returned an OAuth2 error object.
    Server(crate::api::TokenErrorResponse),

    /// Failed to parse the access token contained in the response.
    Token(TokenError),
}

impl std::error::Error for ResponseError {}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResponseError::Json(err) => write!(f, "bad token response: {err}"),
            ResponseError::Msg(err) => write!(f, "bad token response: {err}"),
            ResponseError::Server(err) => write!(f, "token request rejected: {err}"),
            ResponseError::Token(err) => write!(f, "failed to parse token in response: {err}"),
        }
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::Json(err)
    }
}

impl From<&'static str> for ResponseError {
    fn from(err: &'static str) -> Self {
        ResponseError::Msg(err)
    }
}

impl From<TokenError> for ResponseError {
    fn from(err: TokenError) -> Self {
        ResponseError::Token(err)
    }
}
