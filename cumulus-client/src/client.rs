use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use http::request::Request;
use http::uri::PathAndQuery;
use http::{Method, StatusCode, Uri};
use hyper::body::{Body, HttpBody};
use hyper::client::HttpConnector;
use openssl::hash::MessageDigest;
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use openssl::x509::{self, X509};
use serde::Serialize;

use cumulus_login::error::ResponseError;
use cumulus_login::{Login, Validity};

use crate::auth::AuthenticationKind;
use crate::tls::HttpsConnector;
use crate::{Error, Token};

use super::{HttpApiClient, HttpApiResponse};

const USER_AGENT: &str = concat!("cumulus-client/", env!("CARGO_PKG_VERSION"));

type HyperClient = hyper::Client<HttpsConnector, Body>;

#[derive(Default)]
pub enum TlsOptions {
    /// Default TLS verification.
    #[default]
    Verify,

    /// Insecure: ignore invalid certificates.
    Insecure,

    /// Expect a specific certificate fingerprint.
    Fingerprint(Vec<u8>),

    /// Verify with a specific PEM formatted CA.
    CaCert(X509),

    /// Use a callback for certificate verification.
    Callback(Box<dyn Fn(bool, &mut x509::X509StoreContextRef) -> bool + Send + Sync + 'static>),
}

/// A Cumulus API client base backed by a `hyper` client.
pub struct Client {
    api_url: Uri,
    auth: Mutex<Option<Arc<AuthenticationKind>>>,
    client: Arc<HyperClient>,
}

impl Client {
    /// Create a new client instance which will connect to the provided endpoint.
    pub fn new(api_url: Uri) -> Result<Self, Error> {
        Self::with_options(api_url, TlsOptions::default())
    }

    /// Instantiate a client for an API with a given HTTP client instance.
    pub fn with_client(api_url: Uri, client: Arc<HyperClient>) -> Self {
        Self {
            api_url,
            auth: Mutex::new(None),
            client,
        }
    }

    /// Create a new client instance with TLS options for the endpoint.
    pub fn with_options(api_url: Uri, tls_options: TlsOptions) -> Result<Self, Error> {
        let mut connector = SslConnector::builder(SslMethod::tls_client())
            .map_err(|err| Error::internal("failed to create ssl connector builder", err))?;

        match tls_options {
            TlsOptions::Verify => (),
            TlsOptions::Insecure => connector.set_verify(SslVerifyMode::NONE),
            TlsOptions::Fingerprint(expected_fingerprint) => {
                connector.set_verify_callback(SslVerifyMode::PEER, move |valid, chain| {
                    if valid {
                        return true;
                    }
                    verify_fingerprint(chain, &expected_fingerprint)
                });
            }
            TlsOptions::Callback(cb) => {
                connector
                    .set_verify_callback(SslVerifyMode::PEER, move |valid, chain| cb(valid, chain));
            }
            TlsOptions::CaCert(ca) => {
                let mut store = openssl::x509::store::X509StoreBuilder::new().map_err(|err| {
                    Error::internal("failed to create certificate store builder", err)
                })?;
                store
                    .add_cert(ca)
                    .map_err(|err| Error::internal("failed to build certificate store", err))?;
                connector.set_cert_store(store.build());
            }
        }

        let https = HttpsConnector::with_connector(HttpConnector::new(), connector.build());
        let client = hyper::Client::builder().build(https);

        Ok(Self::with_client(api_url, Arc::new(client)))
    }

    /// Get the underlying client object.
    pub fn http_client(&self) -> &Arc<HyperClient> {
        &self.client
    }

    /// Get a reference to the current authentication information.
    pub fn authentication(&self) -> Option<Arc<AuthenticationKind>> {
        self.auth.lock().unwrap().clone()
    }

    /// Replace the authentication information with a static bearer token.
    pub fn use_api_token(&self, token: Token) {
        *self.auth.lock().unwrap() = Some(Arc::new(token.into()));
    }

    /// Drop the current authentication information.
    pub fn logout(&self) {
        self.auth.lock().unwrap().take();
    }

    /// Get the currently used API url.
    pub fn api_url(&self) -> &Uri {
        &self.api_url
    }

    /// Build a URI relative to the current API endpoint.
    fn build_uri(&self, path_and_query: &str) -> Result<Uri, Error> {
        let parts = self.api_url.clone().into_parts();
        let mut builder = http::uri::Builder::new();
        if let Some(scheme) = parts.scheme {
            builder = builder.scheme(scheme);
        }
        if let Some(authority) = parts.authority {
            builder = builder.authority(authority)
        }
        builder
            .path_and_query(
                path_and_query
                    .parse::<PathAndQuery>()
                    .map_err(|err| Error::internal("failed to parse uri", err))?,
            )
            .build()
            .map_err(|err| Error::internal("failed to build Uri", err))
    }

    /// Perform an *authenticated* HTTP request.
    async fn authenticated_request(
        client: Arc<HyperClient>,
        auth: Arc<AuthenticationKind>,
        method: Method,
        uri: Uri,
        json_body: Option<String>,
    ) -> Result<HttpApiResponse, Error> {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::USER_AGENT, USER_AGENT);
        if json_body.is_some() {
            request = request.header(http::header::CONTENT_TYPE, "application/json");
        }
        let request = auth
            .set_auth_headers(request)
            .body(json_body.unwrap_or_default().into())
            .map_err(|err| Error::internal("failed to build request", err))?;

        let response = client
            .request(request)
            .await
            .map_err(|err| Error::internal("http request failed", err))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let (response, body) = response.into_parts();
        let body = read_body(body).await?;

        if !response.status.is_success() {
            // service errors come as a json body, keep it raw so that callers
            // can decode the error object
            let data =
                String::from_utf8(body).map_err(|_| Error::Other("API returned non-utf8 data"))?;

            return Err(Error::api(response.status, data));
        }

        Ok(HttpApiResponse {
            status: response.status.as_u16(),
            content_type,
            body,
        })
    }

    /// Assert that we are authenticated and return the `AuthenticationKind`.
    /// Otherwise returns `Error::Unauthorized`.
    pub fn login_auth(&self) -> Result<Arc<AuthenticationKind>, Error> {
        self.auth
            .lock()
            .unwrap()
            .clone()
            .ok_or(Error::Unauthorized)
    }

    /// Check to see if the access token needs to be refreshed. Note that it is
    /// an error to call this when logged out, which will return
    /// `Error::Unauthorized`.
    ///
    /// Static tokens are always valid.
    pub fn token_validity(&self) -> Result<Validity, Error> {
        match &*self.login_auth()? {
            AuthenticationKind::Token(_) => Ok(Validity::Valid),
            AuthenticationKind::OAuth(auth) => Ok(auth.access_token.validity()),
        }
    }

    /// If the access token expires soon (has a validity of
    /// [`Validity::Refresh`]), this will attempt to refresh it.
    pub async fn maybe_refresh_token(&self) -> Result<(), Error> {
        if let Validity::Refresh = self.token_validity()? {
            self.refresh_token().await?;
        }

        Ok(())
    }

    /// Attempt to refresh the current access token via the SSO.
    ///
    /// If not logged in at all yet, `Error::Unauthorized` will be returned.
    pub async fn refresh_token(&self) -> Result<(), Error> {
        let auth = self.login_auth()?;
        let login = match &*auth {
            AuthenticationKind::Token(_) => return Ok(()),
            AuthenticationKind::OAuth(auth) => auth
                .renew()
                .ok_or(Error::Other("no refresh token available"))?,
        };

        self.login(login).await
    }

    /// Attempt to log in via the SSO token endpoint.
    ///
    /// On success the obtained authentication is stored and used for all
    /// subsequent requests.
    pub async fn login(&self, login: Login) -> Result<(), Error> {
        let request = login_to_request(login.request())?;

        let response = self
            .client
            .request(request)
            .await
            .map_err(|err| Error::internal("http request failed", err))?;

        let (parts, body) = response.into_parts();
        let body = read_body(body).await?;

        if !parts.status.is_success() {
            // the token endpoint reports failures as a json error object
            if let Err(err @ ResponseError::Server(_)) = login.response(&body) {
                return Err(err.into());
            }
            return Err(Error::api(parts.status, "authentication failed"));
        }

        let auth = login.response(&body)?;
        *self.auth.lock().unwrap() = Some(Arc::new(auth.into()));
        Ok(())
    }
}

async fn read_body(mut body: Body) -> Result<Vec<u8>, Error> {
    let mut data = Vec::<u8>::new();
    while let Some(more) = body.data().await {
        let more = more.map_err(|err| Error::internal("error reading response body", err))?;
        data.extend(&more[..]);
    }
    Ok(data)
}

impl HttpApiClient for Client {
    type ResponseFuture<'a>
        = Pin<Box<dyn Future<Output = Result<HttpApiResponse, Error>> + Send + 'a>>
    where
        Self: 'a;

    fn request<'a, T>(
        &'a self,
        method: Method,
        path_and_query: &'a str,
        params: Option<T>,
    ) -> Self::ResponseFuture<'a>
    where
        T: Serialize + 'a,
    {
        let params = params
            .map(|params| {
                serde_json::to_string(&params)
                    .map_err(|err| Error::internal("failed to serialize parameters", err))
            })
            .transpose();

        Box::pin(async move {
            let params = params?;
            let auth = self.login_auth()?;
            let uri = self.build_uri(path_and_query)?;
            let client = Arc::clone(&self.client);
            Self::authenticated_request(client, auth, method, uri, params).await
        })
    }
}

fn login_to_request(request: cumulus_login::Request) -> Result<http::Request<Body>, Error> {
    http::Request::builder()
        .method(Method::POST)
        .uri(request.url)
        .header(http::header::USER_AGENT, USER_AGENT)
        .header(http::header::CONTENT_TYPE, request.content_type)
        .header(
            http::header::CONTENT_LENGTH,
            request.content_length.to_string(),
        )
        .body(request.body.into())
        .map_err(|err| Error::internal("error building login http request", err))
}

fn verify_fingerprint(chain: &x509::X509StoreContextRef, expected_fingerprint: &[u8]) -> bool {
    let Some(cert) = chain.current_cert() else {
        log::error!("no certificate in chain?");
        return false;
    };

    let fp = match cert.digest(MessageDigest::sha256()) {
        Err(err) => {
            log::error!("error calculating certificate fingerprint: {err}");
            return false;
        }
        Ok(fp) => fp,
    };

    if expected_fingerprint != fp.as_ref() {
        log::error!("bad fingerprint: {}", fp_string(&fp));
        log::error!("expected fingerprint: {}", fp_string(expected_fingerprint));
        return false;
    }

    true
}

fn fp_string(fp: &[u8]) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    for b in fp {
        if !out.is_empty() {
            out.push(':');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}
