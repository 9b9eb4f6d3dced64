use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cloud_provider::{CloudProvider, CloudRegion};
use crate::macros::object_kind;
use crate::version::Version;

/// A managed cluster.
///
/// When creating a cluster only a handful of attributes are set; related
/// objects such as the region or version are passed as links.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Cluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Information about the API of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ClusterApi>,

    /// Customer cloud subscription settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccs: Option<Ccs>,

    /// Link to the cloud provider the cluster is installed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<CloudProvider>,

    /// Information about the console of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<ClusterConsole>,

    /// DNS settings of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<Dns>,

    /// Date and time when the cluster will be automatically deleted, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<String>,

    /// External identifier reported by the cluster itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Link to the flavour used to build the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavour: Option<Flavour>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_state: Option<ClusterHealthState>,

    /// Whether the cluster is managed by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,

    /// Whether the control plane is spread over multiple availability zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_az: Option<bool>,

    /// Cluster name, used as the DNS subdomain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Network settings of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,

    /// Information about the nodes of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<ClusterNodes>,

    /// Link to the product installed on the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,

    /// User defined properties for tagging and querying.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,

    /// Link to the cloud provider region the cluster is installed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<CloudRegion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ClusterState>,

    /// Link to the version installed on the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
}

object_kind!(Cluster, "Cluster", "ClusterLink");

/// Information about the API of a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterApi {
    /// URL of the API server of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Listening method of the API server, `external` or `internal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listening: Option<String>,
}

/// Information about the console of a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterConsole {
    /// URL of the console of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Customer cloud subscription settings, set when the cluster is installed
/// into an account owned by the customer.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Ccs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_scp_checks: Option<bool>,
}

/// DNS settings of a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Dns {
    /// Base DNS domain of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_domain: Option<String>,
}

/// Network settings of a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Network {
    /// Subnet prefix length assigned to each individual node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_prefix: Option<u32>,

    /// IP address block for nodes, in CIDR notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_cidr: Option<String>,

    /// IP address block for pods, in CIDR notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_cidr: Option<String>,

    /// IP address block for services, in CIDR notation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_cidr: Option<String>,
}

/// Counts of the different node types of a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterNodes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<u64>,

    /// Instance type used for the compute nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_machine_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infra: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// A set of default values used when installing a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Flavour {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

object_kind!(Flavour, "Flavour", "FlavourLink");

/// A product that can be installed on a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

object_kind!(Product, "Product", "ProductLink");

/// Overall state of a cluster.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterState {
    /// The cluster installation or deletion failed.
    Error,
    /// The cluster is moving to a hibernating state.
    PoweringDown,
    /// The cluster is hibernating, waiting to be resumed.
    Hibernating,
    /// The cluster is being installed.
    Installing,
    /// The installation request was accepted but installation has not started.
    Pending,
    /// Waiting for user action on the cloud account.
    PendingAccount,
    /// The cluster is fully installed.
    Ready,
    /// The cluster is waking up from hibernation.
    Resuming,
    /// The cluster is being removed.
    Uninstalling,
    /// The state could not be determined, also covers values this crate does
    /// not know about.
    #[serde(other)]
    Unknown,
}
serde_plain::derive_display_from_serialize!(ClusterState);

/// Health state of a cluster, derived from telemetry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterHealthState {
    Healthy,
    Unhealthy,
    #[serde(other)]
    Unknown,
}
serde_plain::derive_display_from_serialize!(ClusterHealthState);

/// Detailed status of a cluster, a sub-resource of the cluster itself.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Detailed description of the current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the DNS of the cluster is ready.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ready: Option<bool>,

    /// Error code of a failed provisioning attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision_error_code: Option<String>,

    /// Error message of a failed provisioning attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision_error_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ClusterState>,
}

object_kind!(ClusterStatus, "ClusterStatus", "ClusterStatusLink");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_create_payload() {
        // the shape of a minimal provisioning request
        let cluster = Cluster {
            name: Some("osde2e-abc12".to_string()),
            multi_az: Some(false),
            flavour: Some(Flavour::link("osd-4")),
            region: Some(CloudRegion::link("us-east-1")),
            cloud_provider: Some(CloudProvider::link("aws")),
            version: Some(Version::link("openshift-v4.12.0")),
            properties: [("MadeBy".to_string(), "osde2e".to_string())]
                .into_iter()
                .collect(),
            ..Cluster::default()
        };

        let json = serde_json::to_value(&cluster).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "osde2e-abc12",
                "multi_az": false,
                "flavour": {"kind": "FlavourLink", "id": "osd-4"},
                "region": {"kind": "CloudRegionLink", "id": "us-east-1"},
                "cloud_provider": {"kind": "CloudProviderLink", "id": "aws"},
                "version": {"kind": "VersionLink", "id": "openshift-v4.12.0"},
                "properties": {"MadeBy": "osde2e"},
            })
        );
    }

    #[test]
    fn parse_installed_cluster() {
        let json = r#"{
            "kind": "Cluster",
            "id": "1u2k3h4j5l",
            "href": "/api/clusters_mgmt/v1/clusters/1u2k3h4j5l",
            "api": {"url": "https://api.osde2e-abc12.x8y9.example.org:6443", "listening": "external"},
            "console": {"url": "https://console-openshift-console.apps.osde2e-abc12.x8y9.example.org"},
            "dns": {"base_domain": "x8y9.example.org"},
            "name": "osde2e-abc12",
            "managed": true,
            "state": "ready",
            "health_state": "healthy",
            "nodes": {"compute": 4, "infra": 2, "master": 3, "total": 9},
            "version": {"kind": "VersionLink", "id": "openshift-v4.12.0"}
        }"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.state, Some(ClusterState::Ready));
        assert_eq!(cluster.health_state, Some(ClusterHealthState::Healthy));
        assert_eq!(cluster.nodes.unwrap().total, Some(9));
        assert!(cluster.version.unwrap().is_link());
        assert!(cluster.properties.is_empty());
    }

    #[test]
    fn unlisted_states_fall_back_to_unknown() {
        // newer servers report intermediate states such as "validating" or
        // "waiting"; they must not break parsing of the whole cluster
        let json = r#"{
            "kind": "Cluster",
            "id": "1u2k3h4j5l",
            "state": "validating",
            "health_state": "degraded"
        }"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.state, Some(ClusterState::Unknown));
        assert_eq!(cluster.health_state, Some(ClusterHealthState::Unknown));
        assert_eq!(cluster.id.as_deref(), Some("1u2k3h4j5l"));
    }

    #[test]
    fn state_display() {
        assert_eq!(ClusterState::PendingAccount.to_string(), "pending_account");
        assert_eq!(ClusterState::Ready.to_string(), "ready");

        let state: ClusterState = serde_json::from_str(r#""powering_down""#).unwrap();
        assert_eq!(state, ClusterState::PoweringDown);
    }
}
