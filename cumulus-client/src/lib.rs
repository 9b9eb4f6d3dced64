#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use std::future::Future;

use http::Method;
use serde::{Deserialize, Serialize};

mod error;

pub use error::Error;

pub use cumulus_login::{Authentication, Login, Validity};

mod api_path_builder;
pub use api_path_builder::ApiPathBuilder;

pub(crate) mod auth;
pub use auth::{AuthenticationKind, Token};

#[cfg(feature = "hyper-client")]
mod client;
#[cfg(feature = "hyper-client")]
pub use client::{Client, TlsOptions};

#[cfg(feature = "hyper-client")]
mod tls;
#[cfg(feature = "hyper-client")]
pub use tls::{HttpsConnector, MaybeTlsStream};

/// HTTP client backend trait. This should be implemented for a HTTP client capable of making
/// *authenticated* API requests to the Cumulus HTTP API.
pub trait HttpApiClient {
    /// An API call should return a status code and the raw body.
    type ResponseFuture<'a>: Future<Output = Result<HttpApiResponse, Error>> + 'a
    where
        Self: 'a;

    /// An *authenticated* asynchronous request with a path and query component (no hostname), and
    /// an optional JSON body, of which the response body is read to completion.
    ///
    /// For this request, authentication headers should be set!
    fn request<'a, T>(
        &'a self,
        method: Method,
        path_and_query: &'a str,
        params: Option<T>,
    ) -> Self::ResponseFuture<'a>
    where
        T: Serialize + 'a;

    /// Calls `self.request` with `Method::GET` and `None` for the body.
    fn get<'a>(&'a self, path_and_query: &'a str) -> Self::ResponseFuture<'a> {
        self.request(Method::GET, path_and_query, None::<()>)
    }

    /// Calls `self.request` with `Method::POST`.
    fn post<'a, T>(&'a self, path_and_query: &'a str, params: &'a T) -> Self::ResponseFuture<'a>
    where
        T: ?Sized + Serialize,
    {
        self.request(Method::POST, path_and_query, Some(params))
    }

    /// Calls `self.request` with `Method::PUT`.
    fn put<'a, T>(&'a self, path_and_query: &'a str, params: &'a T) -> Self::ResponseFuture<'a>
    where
        T: ?Sized + Serialize,
    {
        self.request(Method::PUT, path_and_query, Some(params))
    }

    /// Calls `self.request` with `Method::PATCH`, the method used by the API
    /// for partial updates.
    fn patch<'a, T>(&'a self, path_and_query: &'a str, params: &'a T) -> Self::ResponseFuture<'a>
    where
        T: ?Sized + Serialize,
    {
        self.request(Method::PATCH, path_and_query, Some(params))
    }

    /// Calls `self.request` with `Method::DELETE` and `None` for the body.
    fn delete<'a>(&'a self, path_and_query: &'a str) -> Self::ResponseFuture<'a> {
        self.request(Method::DELETE, path_and_query, None::<()>)
    }
}

/// A response from the HTTP API as required by the [`HttpApiClient`] trait.
pub struct HttpApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpApiResponse {
    /// Expect a JSON response and deserialize it.
    ///
    /// The API returns objects directly, without a wrapping envelope.
    pub fn expect_json<T>(self) -> Result<T, Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.assert_json_content_type()?;

        serde_json::from_slice::<T>(&self.body)
            .map_err(|err| Error::bad_api("failed to parse api response", err))
    }

    fn assert_json_content_type(&self) -> Result<(), Error> {
        match self
            .content_type
            .as_deref()
            .and_then(|v| v.split(';').next())
        {
            Some("application/json") => Ok(()),
            Some(other) => Err(Error::BadApi(
                format!("expected json body, got {other}"),
                None,
            )),
            None => Err(Error::BadApi(
                "expected json body, but no Content-Type was sent".to_string(),
                None,
            )),
        }
    }

    /// Expect that the API call did *not* return any data, such as the
    /// `204 No Content` responses to `DELETE` requests.
    pub fn nodata(self) -> Result<(), Error> {
        if self.body.is_empty() {
            Ok(())
        } else {
            Err(Error::BadApi(
                "api returned unexpected data".to_string(),
                None,
            ))
        }
    }
}

impl<C> HttpApiClient for &C
where
    C: HttpApiClient,
{
    type ResponseFuture<'a>
        = C::ResponseFuture<'a>
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
        C::request(self, method, path_and_query, params)
    }
}

impl<C> HttpApiClient for std::sync::Arc<C>
where
    C: HttpApiClient,
{
    type ResponseFuture<'a>
        = C::ResponseFuture<'a>
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
        C::request(self, method, path_and_query, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_response(body: &str) -> HttpApiResponse {
        HttpApiResponse {
            status: 200,
            content_type: Some("application/json;charset=utf-8".to_string()),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn expect_json_parses_bare_objects() {
        #[derive(serde::Deserialize)]
        struct Version {
            id: String,
        }

        let version: Version = json_response(r#"{"id":"openshift-v4.12.0"}"#)
            .expect_json()
            .unwrap();
        assert_eq!(version.id, "openshift-v4.12.0");
    }

    #[test]
    fn expect_json_checks_content_type() {
        let response = HttpApiResponse {
            status: 200,
            content_type: Some("text/html".to_string()),
            body: b"<html></html>".to_vec(),
        };
        assert!(matches!(
            response.expect_json::<serde_json::Value>(),
            Err(Error::BadApi(..))
        ));

        let response = HttpApiResponse {
            status: 200,
            content_type: None,
            body: Vec::new(),
        };
        assert!(response.expect_json::<serde_json::Value>().is_err());
    }

    #[test]
    fn nodata() {
        let response = HttpApiResponse {
            status: 204,
            content_type: None,
            body: Vec::new(),
        };
        assert!(response.nodata().is_ok());

        assert!(json_response("{}").nodata().is_err());
    }
}
