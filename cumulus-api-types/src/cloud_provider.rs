use serde::{Deserialize, Serialize};

use crate::macros::object_kind;

/// A cloud provider clusters can be provisioned on.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CloudProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Human friendly identifier, for example `AWS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Unique identifier, for example `aws`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

object_kind!(CloudProvider, "CloudProvider", "CloudProviderLink");

/// A region of a cloud provider.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CloudRegion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Link to the cloud provider that the region belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<CloudProvider>,

    /// Human friendly identifier, for example `N. Virginia`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Whether the region is enabled for provisioning clusters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Unique identifier, for example `us-east-1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the region supports multiple availability zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_multi_az: Option<bool>,
}

object_kind!(CloudRegion, "CloudRegion", "CloudRegionLink");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_links_to_provider() {
        let json = r#"{
            "kind": "CloudRegion",
            "id": "us-east-1",
            "href": "/api/clusters_mgmt/v1/cloud_providers/aws/regions/us-east-1",
            "cloud_provider": {
                "kind": "CloudProviderLink",
                "id": "aws",
                "href": "/api/clusters_mgmt/v1/cloud_providers/aws"
            },
            "display_name": "N. Virginia",
            "enabled": true,
            "name": "us-east-1"
        }"#;
        let region: CloudRegion = serde_json::from_str(json).unwrap();
        assert!(!region.is_link());
        let provider = region.cloud_provider.unwrap();
        assert!(provider.is_link());
        assert_eq!(provider.id.as_deref(), Some("aws"));
    }

    #[test]
    fn link_constructor() {
        let link = CloudProvider::link("aws");
        assert!(link.is_link());
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            serde_json::json!({"kind": "CloudProviderLink", "id": "aws"})
        );
    }
}
