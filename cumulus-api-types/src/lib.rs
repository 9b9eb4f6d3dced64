//! Data types and operations of the Cumulus cluster management API.
//!
//! All object types follow the service wire format: snake_case JSON keys,
//! every attribute optional and skipped when unset, and a `kind` / `id` /
//! `href` triple identifying the object. The `kind` of a partial reference
//! carries a `Link` suffix; use the `link()` constructor of a type to build
//! such a reference.

mod macros;

mod error;
pub use error::ApiError;

mod list;
pub use list::{List, ListParams};

mod metadata;
pub use metadata::Metadata;

mod cloud_provider;
pub use cloud_provider::{CloudProvider, CloudRegion};

mod version;
pub use version::Version;

mod cluster;
pub use cluster::{
    Ccs, Cluster, ClusterApi, ClusterConsole, ClusterHealthState, ClusterNodes, ClusterState,
    ClusterStatus, Dns, Flavour, Network, Product,
};

mod credentials;
pub use credentials::{AdminCredentials, ClusterCredentials};

mod addon;
pub use addon::{
    AddOn, AddOnInstallMode, AddOnInstallation, AddOnInstallationParameter, AddOnInstallationState,
};

mod machine_pool;
pub use machine_pool::{MachinePool, Taint};

mod upgrade_policy;
pub use upgrade_policy::{
    ScheduleType, UpgradePolicy, UpgradePolicyState, UpgradePolicyValueState, UpgradeType,
};

#[cfg(feature = "client")]
mod client;
#[cfg(feature = "client")]
pub use client::{ClustersMgmtClient, API_ROOT};
