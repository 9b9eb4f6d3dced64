use serde::{Deserialize, Serialize};

use crate::macros::object_kind;

/// A policy describing when and how a cluster is upgraded.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpgradePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Identifier of the cluster the policy applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    /// Next scheduled run of the policy, RFC 3339.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run: Option<String>,

    /// Cron expression for `automatic` policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<ScheduleType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_type: Option<UpgradeType>,

    /// Version the cluster is upgraded to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

object_kind!(UpgradePolicy, "UpgradePolicy", "UpgradePolicyLink");

/// How the next run of an upgrade policy is determined.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    /// The next run is derived from the cron schedule.
    Automatic,
    /// The next run was set explicitly.
    Manual,
}
serde_plain::derive_display_from_serialize!(ScheduleType);

/// What an upgrade policy upgrades.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum UpgradeType {
    #[serde(rename = "OSD")]
    Osd,
    #[serde(rename = "ADDON")]
    AddOn,
}
serde_plain::derive_display_from_serialize!(UpgradeType);

/// The current state of an upgrade policy, a sub-resource of the policy.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpgradePolicyState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Human readable description of the current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<UpgradePolicyValueState>,
}

object_kind!(UpgradePolicyState, "UpgradePolicyState", "UpgradePolicyStateLink");

/// The value of an upgrade policy state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradePolicyValueState {
    Cancelled,
    Completed,
    Delayed,
    Failed,
    Pending,
    Scheduled,
    Started,
    /// Catch-all for wire values this crate does not know about.
    #[serde(other)]
    Unknown,
}
serde_plain::derive_display_from_serialize!(UpgradePolicyValueState);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_request_payload() {
        let policy = UpgradePolicy {
            schedule_type: Some(ScheduleType::Manual),
            upgrade_type: Some(UpgradeType::Osd),
            next_run: Some("2026-08-25T06:00:00Z".to_string()),
            version: Some("4.12.1".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "schedule_type": "manual",
                "upgrade_type": "OSD",
                "next_run": "2026-08-25T06:00:00Z",
                "version": "4.12.1",
            })
        );
    }

    #[test]
    fn parse_policy_state() {
        let json = r#"{
            "kind": "UpgradePolicyState",
            "value": "scheduled",
            "description": "Upgrade scheduled."
        }"#;
        let state: UpgradePolicyState = serde_json::from_str(json).unwrap();
        assert_eq!(state.value, Some(UpgradePolicyValueState::Scheduled));
        assert_eq!(state.value.unwrap().to_string(), "scheduled");
    }

    #[test]
    fn unlisted_value_state_falls_back_to_unknown() {
        let json = r#"{"kind": "UpgradePolicyState", "value": "validating"}"#;
        let state: UpgradePolicyState = serde_json::from_str(json).unwrap();
        assert_eq!(state.value, Some(UpgradePolicyValueState::Unknown));
    }
}
