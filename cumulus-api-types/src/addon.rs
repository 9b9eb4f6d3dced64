use serde::{Deserialize, Serialize};

use crate::list::List;
use crate::macros::object_kind;

/// An add-on that can be installed on clusters.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AddOn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Description of the add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Link to documentation about the add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_link: Option<String>,

    /// Whether the add-on can be installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Base64-encoded icon representing the add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// The mode in which the add-on is deployed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_mode: Option<AddOnInstallMode>,

    /// Label to attach to the cluster when the add-on is installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Name of the add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name of the operator installed by the add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_name: Option<String>,

    /// Amount of the resource consumed by one unit of the add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_cost: Option<f64>,

    /// Name of the resource the add-on consumes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    /// Namespace the add-on is installed into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
}

object_kind!(AddOn, "AddOn", "AddOnLink");

/// Deployment mode of an add-on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnInstallMode {
    OwnNamespace,
    SingleNamespace,
}
serde_plain::derive_display_from_serialize!(AddOnInstallMode);

/// An installation of an add-on on a specific cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AddOnInstallation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Link to the installed add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addon: Option<AddOn>,

    /// Version of the operator deployed by the add-on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_version: Option<String>,

    /// Parameters the add-on was installed with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<List<AddOnInstallationParameter>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<AddOnInstallationState>,

    /// Reason for the current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_description: Option<String>,
}

object_kind!(AddOnInstallation, "AddOnInstallation", "AddOnInstallationLink");

/// A parameter value of an add-on installation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AddOnInstallationParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// State of an add-on installation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnInstallationState {
    Deleting,
    Failed,
    Installing,
    Pending,
    Ready,
    /// Catch-all for wire values this crate does not know about.
    #[serde(other)]
    Unknown,
}
serde_plain::derive_display_from_serialize!(AddOnInstallationState);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installation_request_payload() {
        let installation = AddOnInstallation {
            addon: Some(AddOn::link("managed-velero-operator")),
            parameters: Some(
                vec![AddOnInstallationParameter {
                    id: Some("use-wildcard-certs".to_string()),
                    value: Some("true".to_string()),
                    ..Default::default()
                }]
                .into(),
            ),
            ..Default::default()
        };

        let json = serde_json::to_value(&installation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "addon": {"kind": "AddOnLink", "id": "managed-velero-operator"},
                "parameters": {
                    "items": [{"id": "use-wildcard-certs", "value": "true"}]
                },
            })
        );
    }

    #[test]
    fn parse_installation_state() {
        let json = r#"{
            "kind": "AddOnInstallation",
            "id": "managed-velero-operator",
            "addon": {"kind": "AddOnLink", "id": "managed-velero-operator"},
            "state": "installing",
            "state_description": "waiting for operator deployment"
        }"#;
        let installation: AddOnInstallation = serde_json::from_str(json).unwrap();
        assert_eq!(installation.state, Some(AddOnInstallationState::Installing));
        assert!(installation.addon.unwrap().is_link());
    }

    #[test]
    fn unlisted_state_falls_back_to_unknown() {
        let json = r#"{
            "kind": "AddOnInstallation",
            "id": "managed-velero-operator",
            "state": "deleted"
        }"#;
        let installation: AddOnInstallation = serde_json::from_str(json).unwrap();
        assert_eq!(installation.state, Some(AddOnInstallationState::Unknown));
    }
}
