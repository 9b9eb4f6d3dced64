use serde::{Deserialize, Serialize};

use crate::macros::object_kind;

/// A product version that clusters can be created with or upgraded to.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Version {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Unique identifier, for example `openshift-v4.12.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Versions this one can be upgraded to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_upgrades: Vec<String>,

    /// Release channel the version is part of, for example `stable` or
    /// `candidate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_group: Option<String>,

    /// Whether this is the version used when none is requested explicitly.
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    /// Whether the version can be used to create clusters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// The version identifier without the product prefix, for example
    /// `4.12.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<String>,
}

object_kind!(Version, "Version", "VersionLink");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_version() {
        let json = r#"{
            "kind": "Version",
            "id": "openshift-v4.12.0",
            "href": "/api/clusters_mgmt/v1/versions/openshift-v4.12.0",
            "available_upgrades": ["4.12.1", "4.12.2"],
            "channel_group": "stable",
            "default": true,
            "enabled": true,
            "raw_id": "4.12.0"
        }"#;
        let version: Version = serde_json::from_str(json).unwrap();
        assert_eq!(version.raw_id.as_deref(), Some("4.12.0"));
        assert_eq!(version.is_default, Some(true));
        assert_eq!(version.available_upgrades, ["4.12.1", "4.12.2"]);

        // the keyword attribute keeps its wire name
        let json = serde_json::to_value(&version).unwrap();
        assert_eq!(json["default"], serde_json::json!(true));
    }
}
