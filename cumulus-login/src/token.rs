//! Access token related data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// We start refreshing during the final minute of the token lifetime.
const REFRESH_EARLY_BY: i64 = 60;

/// A parsed JWT access token. Serializable so it can be stored for later reuse.
///
/// Only the registered claims needed by a client are extracted from the
/// payload; the signature is never validated here, that is the server's job.
#[derive(Clone, Debug)]
pub struct AccessToken {
    data: Box<str>,
    exp: i64,
    subject: Option<String>,
}

#[derive(Deserialize)]
struct Claims {
    exp: i64,
    #[serde(default)]
    sub: Option<String>,
}

impl AccessToken {
    /// The expiry claim as a UNIX epoch.
    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    /// The `sub` claim, if the token carries one.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// The remaining lifetime in seconds, negative once expired.
    pub fn remaining(&self) -> i64 {
        self.exp - epoch_i64()
    }

    /// Check whether the token is still usable or due for a refresh.
    pub fn validity(&self) -> Validity {
        let remaining = self.remaining();
        if remaining <= 0 {
            Validity::Expired
        } else if remaining <= REFRESH_EARLY_BY {
            Validity::Refresh
        } else {
            Validity::Valid
        }
    }

    /// The value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.data)
    }
}

/// Whether a token should be refreshed or is already invalid and needs to be renewed before use.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Validity {
    /// The token is valid for longer than the refresh window.
    Valid,

    /// The token is within its final refresh window and should be renewed soon.
    Refresh,

    /// The token is already expired and must be renewed before the next request.
    Expired,
}

impl Validity {
    /// Simply check whether the token is considered valid even if it should be renewed.
    pub fn is_valid(self) -> bool {
        matches!(self, Validity::Valid | Validity::Refresh)
    }
}

impl std::str::FromStr for AccessToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, TokenError> {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;

        let mut parts = s.split('.');
        let (_header, payload, _signature) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(p), Some(s)) if !h.is_empty() && !p.is_empty() && !s.is_empty() => {
                (h, p, s)
            }
            _ => return Err(TokenError),
        };
        if parts.next().is_some() {
            return Err(TokenError);
        }

        let payload = URL_SAFE_NO_PAD.decode(payload).map_err(|_| TokenError)?;
        let claims: Claims = serde_json::from_slice(&payload).map_err(|_| TokenError)?;

        Ok(Self {
            data: s.into(),
            exp: claims.exp,
            subject: claims.sub,
        })
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.data)
    }
}

impl From<AccessToken> for String {
    fn from(token: AccessToken) -> String {
        token.data.into()
    }
}

impl Serialize for AccessToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.data)
    }
}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        std::borrow::Cow::<'de, str>::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

/// A finished authentication state.
///
/// This is serializable / deserializable in order to be able to easily store it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Authentication {
    /// The token endpoint this authentication was obtained from.
    pub token_url: String,

    /// The client id used to obtain the token.
    pub client_id: String,

    /// The current access token.
    pub access_token: AccessToken,

    /// The refresh token to renew with, if the grant supports renewal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Authentication {
    /// Prepare the [`Login`](crate::Login) renewing this authentication via
    /// the refresh token, if one is available.
    pub fn renew(&self) -> Option<crate::Login> {
        self.refresh_token.as_deref().map(|token| {
            crate::Login::refresh_token(self.token_url.clone(), self.client_id.clone(), token)
        })
    }

    #[cfg(feature = "http")]
    /// Add the `Authorization` header to a request.
    pub fn set_auth_headers(&self, request: http::request::Builder) -> http::request::Builder {
        request.header(http::header::AUTHORIZATION, self.access_token.bearer())
    }
}

pub(crate) fn epoch_i64() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now();
    if now > UNIX_EPOCH {
        i64::try_from(now.duration_since(UNIX_EPOCH).unwrap().as_secs()).unwrap_or(0)
    } else {
        -i64::try_from(UNIX_EPOCH.duration_since(now).unwrap().as_secs()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(claims: &str) -> String {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.as_bytes());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn parse_access_token() {
        let raw = make_token(r#"{"exp":4102444800,"sub":"svc:tester"}"#);
        let token: AccessToken = raw.parse().unwrap();
        assert_eq!(token.expires_at(), 4102444800);
        assert_eq!(token.subject(), Some("svc:tester"));
        assert_eq!(token.to_string(), raw);
        // year 2100, still valid when this test runs
        assert_eq!(token.validity(), Validity::Valid);
    }

    #[test]
    fn expired_token() {
        let raw = make_token(r#"{"exp":1000}"#);
        let token: AccessToken = raw.parse().unwrap();
        assert_eq!(token.validity(), Validity::Expired);
        assert!(!token.validity().is_valid());
    }

    #[test]
    fn reject_garbage() {
        assert!("not-a-jwt".parse::<AccessToken>().is_err());
        assert!("a.b".parse::<AccessToken>().is_err());
        assert!("..".parse::<AccessToken>().is_err());

        // valid shape, payload not base64 json
        assert!("aGVhZGVy.!!!.c2ln".parse::<AccessToken>().is_err());
    }

    #[test]
    fn token_serde_roundtrip() {
        let raw = make_token(r#"{"exp":4102444800}"#);
        let token: AccessToken = raw.parse().unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, format!("\"{raw}\""));
        let back: AccessToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back.expires_at(), token.expires_at());
    }
}
