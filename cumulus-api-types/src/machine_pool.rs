use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::macros::object_kind;

/// A pool of worker nodes attached to a cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MachinePool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Availability zones the machine pool spans.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability_zones: Vec<String>,

    /// Instance type of the nodes, for example `m5.xlarge`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    /// Labels set on the nodes of the pool.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,

    /// Number of nodes in the pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u64>,

    /// Taints set on the nodes of the pool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<Taint>,
}

object_kind!(MachinePool, "MachinePool", "MachinePoolLink");

/// A taint keeping pods without a matching toleration off the nodes.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Taint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_request_payload() {
        let pool = MachinePool {
            id: Some("worker-tests".to_string()),
            instance_type: Some("m5.xlarge".to_string()),
            replicas: Some(3),
            labels: [("role".to_string(), "e2e".to_string())].into_iter().collect(),
            taints: vec![Taint {
                effect: Some("NoSchedule".to_string()),
                key: Some("tests-only".to_string()),
                value: Some("true".to_string()),
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "worker-tests",
                "instance_type": "m5.xlarge",
                "replicas": 3,
                "labels": {"role": "e2e"},
                "taints": [
                    {"effect": "NoSchedule", "key": "tests-only", "value": "true"}
                ],
            })
        );
    }
}
