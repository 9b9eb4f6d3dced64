use std::error::Error as StdError;
use std::fmt;

use cumulus_login::error::{ResponseError, TokenError};

/// The errors generated by this client.
#[derive(Debug)]
pub enum Error {
    /// An API call which requires authorization was attempted without logging in first, or the
    /// server rejected our credentials.
    Unauthorized,

    /// An API call returned an error status. The raw response body is included and may contain a
    /// serialized service error object.
    Api(http::StatusCode, String),

    /// The API behaved unexpectedly, for example by returning a body that does not match its
    /// declared content type.
    BadApi(String, Option<Box<dyn StdError + Send + Sync + 'static>>),

    /// The token endpoint rejected or garbled a login request.
    Login(ResponseError),

    /// An access token could not be parsed.
    Token(TokenError),

    /// A generic internal error such as a serde_json serialization error.
    Internal(&'static str, Box<dyn StdError + Send + Sync + 'static>),

    /// Generic error message.
    Other(&'static str),

    /// An `anyhow` error from the underlying HTTP machinery.
    Anyhow(anyhow::Error),
}

impl Error {
    /// An API call returned an error status.
    pub(crate) fn api<T: fmt::Display>(status: http::StatusCode, msg: T) -> Self {
        Error::Api(status, msg.to_string())
    }

    /// The API behaved unexpectedly.
    pub(crate) fn bad_api<E>(msg: &str, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::BadApi(msg.to_string(), Some(Box::new(err)))
    }

    /// A generic internal error.
    pub(crate) fn internal<E>(context: &'static str, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::Internal(context, Box::new(err))
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::BadApi(_, Some(err)) => Some(&**err),
            Error::Login(err) => Some(err),
            Error::Token(err) => Some(err),
            Error::Internal(_, err) => Some(&**err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unauthorized => f.write_str("unauthorized"),
            Error::Api(status, msg) => write!(f, "api error (status = {status}): {msg}"),
            Error::BadApi(msg, _) => write!(f, "api returned unexpected data: {msg}"),
            Error::Login(err) => write!(f, "login failed: {err}"),
            Error::Token(err) => fmt::Display::fmt(err, f),
            Error::Internal(context, err) => write!(f, "{context}: {err}"),
            Error::Other(msg) => f.write_str(msg),
            Error::Anyhow(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Anyhow(err)
    }
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        Error::Login(err)
    }
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::Token(err)
    }
}
