use serde::{Deserialize, Serialize};

/// Metadata of the cluster management service, returned by the API root.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Metadata {
    /// Version of the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_version: Option<String>,
}
