use serde::{Deserialize, Serialize};

use crate::macros::object_kind;

/// Credentials of a cluster, only available once the installation finished.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Administrator credentials of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminCredentials>,

    /// Kubeconfig file contents for the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
}

object_kind!(
    ClusterCredentials,
    "ClusterCredentials",
    "ClusterCredentialsLink"
);

/// Temporary administrator credentials generated during installation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AdminCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_credentials() {
        let json = r#"{
            "kind": "ClusterCredentials",
            "href": "/api/clusters_mgmt/v1/clusters/1u2k3h4j5l/credentials",
            "kubeconfig": "apiVersion: v1\nclusters: []\n",
            "admin": {"user": "kubeadmin", "password": "hunter2-hunter2"}
        }"#;
        let credentials: ClusterCredentials = serde_json::from_str(json).unwrap();
        assert!(credentials.kubeconfig.unwrap().starts_with("apiVersion"));
        assert_eq!(credentials.admin.unwrap().user.as_deref(), Some("kubeadmin"));
    }
}
