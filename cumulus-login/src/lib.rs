//! This package provides helpers for logging into the Cumulus API via the
//! product SSO. It builds the token endpoint requests and parses their
//! responses, but never performs any HTTP itself, so it can be used with any
//! HTTP client implementation.

pub mod api;
pub mod error;
pub mod token;

const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

#[doc(inline)]
pub use token::{AccessToken, Authentication, Validity};

use error::ResponseError;

/// A request to be sent to the SSO token endpoint.
///
/// Note that the body is always form encoded (`application/x-www-form-urlencoded`)
/// and the request method is POST.
#[derive(Clone, Debug)]
pub struct Request {
    pub url: String,

    /// This is always `application/x-www-form-urlencoded`.
    pub content_type: &'static str,

    /// The `Content-length` header field.
    pub content_length: usize,

    /// The body.
    pub body: String,
}

/// The OAuth2 grant used to obtain an access token.
#[derive(Clone, Debug)]
enum Grant {
    /// Renew via a (long lived offline, or previously rotated) refresh token.
    RefreshToken(String),

    /// Service account login with a client secret.
    ClientCredentials(String),
}

/// Token request builder.
///
/// This takes a token endpoint URL, a client id and either a refresh token or
/// a client secret in order to create an HTTP [`Request`] for a new access
/// token.
#[derive(Clone, Debug)]
pub struct Login {
    token_url: String,
    client_id: String,
    grant: Grant,
    scopes: Vec<String>,
}

fn normalize_url(mut url: String) -> String {
    url.truncate(url.trim_end_matches('/').len());
    url
}

impl Login {
    /// Prepare a request using the `refresh_token` grant, the flow used with
    /// the long lived offline tokens handed out by the product UI.
    pub fn refresh_token(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            token_url: normalize_url(token_url.into()),
            client_id: client_id.into(),
            grant: Grant::RefreshToken(refresh_token.into()),
            scopes: Vec::new(),
        }
    }

    /// Prepare a request using the `client_credentials` grant for a service
    /// account.
    pub fn client_credentials(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            token_url: normalize_url(token_url.into()),
            client_id: client_id.into(),
            grant: Grant::ClientCredentials(client_secret.into()),
            scopes: Vec::new(),
        }
    }

    /// Request the given scope in addition to the defaults of the realm.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Get the token endpoint URL this request is for.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Get the client id this request is for.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Create an HTTP [`Request`] from the current data.
    ///
    /// If the request returns a successful result, the response's body should
    /// be passed to the [`response`](Login::response) method in order to
    /// extract the validated access token.
    pub fn request(&self) -> Request {
        let mut body = form_urlencoded::Serializer::new(String::new());
        body.append_pair("client_id", &self.client_id);
        match &self.grant {
            Grant::RefreshToken(token) => {
                body.append_pair("grant_type", "refresh_token");
                body.append_pair("refresh_token", token);
            }
            Grant::ClientCredentials(secret) => {
                body.append_pair("grant_type", "client_credentials");
                body.append_pair("client_secret", secret);
            }
        }
        if !self.scopes.is_empty() {
            body.append_pair("scope", &self.scopes.join(" "));
        }
        let body = body.finish();

        Request {
            url: self.token_url.clone(),
            content_type: CONTENT_TYPE_FORM,
            content_length: body.len(),
            body,
        }
    }

    /// Parse the result body of a token endpoint request.
    ///
    /// On success this yields an [`Authentication`] ready for use with the
    /// API. Error bodies from the token endpoint are reported as
    /// [`ResponseError::Server`].
    pub fn response<T: ?Sized + AsRef<[u8]>>(
        &self,
        body: &T,
    ) -> Result<Authentication, ResponseError> {
        self.response_bytes(body.as_ref())
    }

    fn response_bytes(&self, body: &[u8]) -> Result<Authentication, ResponseError> {
        let response: api::TokenResponse = match serde_json::from_slice(body) {
            Ok(response) => response,
            Err(err) => {
                // the endpoint reports failures with a different body
                if let Ok(server_err) = serde_json::from_slice::<api::TokenErrorResponse>(body) {
                    return Err(ResponseError::Server(server_err));
                }
                return Err(err.into());
            }
        };

        if !response.token_type.eq_ignore_ascii_case("bearer") {
            return Err("token response with unexpected token type".into());
        }

        let access_token: AccessToken = response.access_token.parse()?;

        // prefer the rotated refresh token handed back by the server
        let refresh_token = response.refresh_token.or_else(|| match &self.grant {
            Grant::RefreshToken(token) => Some(token.clone()),
            Grant::ClientCredentials(_) => None,
        });

        Ok(Authentication {
            token_url: self.token_url.clone(),
            client_id: self.client_id.clone(),
            access_token,
            refresh_token,
        })
    }
}
