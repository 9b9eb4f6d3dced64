use std::fmt;

use serde::{Deserialize, Serialize};

/// The error body returned by the service for failed requests.
///
/// ```json
/// {
///   "kind": "Error",
///   "id": "404",
///   "href": "/api/clusters_mgmt/v1/errors/404",
///   "code": "CLUSTERS-MGMT-404",
///   "reason": "Cluster '...' not found",
///   "operation_id": "..."
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Globally unique error code, `<SERVICE>-<status>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human readable description of the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Identifier of the failed request, useful when contacting support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl ApiError {
    pub const KIND: &'static str = "Error";

    /// Try to decode the service error object out of a client error.
    ///
    /// Non-success responses surface as [`cumulus_client::Error::Api`] with
    /// the raw body attached; this decodes the body where it is a serialized
    /// service error.
    #[cfg(feature = "client")]
    pub fn from_client_error(err: &cumulus_client::Error) -> Option<Self> {
        match err {
            cumulus_client::Error::Api(_, body) => {
                let parsed: Self = serde_json::from_str(body).ok()?;
                (parsed.kind.as_deref() == Some(Self::KIND)).then_some(parsed)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.code, &self.reason) {
            (Some(code), Some(reason)) => write!(f, "{code}: {reason}"),
            (Some(code), None) => f.write_str(code),
            (None, Some(reason)) => f.write_str(reason),
            (None, None) => f.write_str("unknown api error"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err: ApiError = serde_json::from_str(
            r#"{
                "kind": "Error",
                "id": "404",
                "href": "/api/clusters_mgmt/v1/errors/404",
                "code": "CLUSTERS-MGMT-404",
                "reason": "Cluster '1u2k3h4j5l' not found",
                "operation_id": "8d9f1b0a"
            }"#,
        )
        .unwrap();
        assert_eq!(
            err.to_string(),
            "CLUSTERS-MGMT-404: Cluster '1u2k3h4j5l' not found"
        );
    }

    #[cfg(feature = "client")]
    #[test]
    fn from_client_error() {
        let body = r#"{"kind":"Error","code":"CLUSTERS-MGMT-429","reason":"Too many requests"}"#;
        let err = cumulus_client::Error::Api(
            http_status(429),
            body.to_string(),
        );
        let api_err = ApiError::from_client_error(&err).unwrap();
        assert_eq!(api_err.code.as_deref(), Some("CLUSTERS-MGMT-429"));

        // plain text bodies yield no error object
        let err = cumulus_client::Error::Api(http_status(502), "Bad Gateway".to_string());
        assert!(ApiError::from_client_error(&err).is_none());
    }

    #[cfg(feature = "client")]
    fn http_status(code: u16) -> http::StatusCode {
        http::StatusCode::from_u16(code).unwrap()
    }
}
