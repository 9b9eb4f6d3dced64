//! Typed operations on the cluster management service.

use cumulus_client::{ApiPathBuilder, Error, HttpApiClient};

use crate::{
    AddOn, AddOnInstallation, CloudProvider, CloudRegion, Cluster, ClusterCredentials,
    ClusterStatus, List, ListParams, MachinePool, Metadata, UpgradePolicy, UpgradePolicyState,
    Version,
};

/// Base path of the cluster management service.
pub const API_ROOT: &str = "/api/clusters_mgmt/v1";

/// Client for the cluster management service.
///
/// Wraps any [`HttpApiClient`] and issues requests below
/// `/api/clusters_mgmt/v1`.
pub struct ClustersMgmtClient<T>(pub T);

fn with_list_params(base: String, params: &ListParams) -> String {
    ApiPathBuilder::new(base)
        .maybe_arg("page", &params.page)
        .maybe_arg("size", &params.size)
        .maybe_arg("search", &params.search)
        .maybe_arg("order", &params.order)
        .build()
}

impl<T> ClustersMgmtClient<T>
where
    T: HttpApiClient,
{
    /// `GET /api/clusters_mgmt/v1`
    pub async fn metadata(&self) -> Result<Metadata, Error> {
        self.0.get(API_ROOT).await?.expect_json()
    }

    /// `GET .../clusters`
    pub async fn list_clusters(&self, params: ListParams) -> Result<List<Cluster>, Error> {
        let url = with_list_params(format!("{API_ROOT}/clusters"), &params);
        self.0.get(&url).await?.expect_json()
    }

    /// `POST .../clusters`: provision a new cluster.
    pub async fn create_cluster(&self, cluster: &Cluster) -> Result<Cluster, Error> {
        let url = format!("{API_ROOT}/clusters");
        self.0.post(&url, cluster).await?.expect_json()
    }

    /// `GET .../clusters/{id}`
    pub async fn get_cluster(&self, id: &str) -> Result<Cluster, Error> {
        let url = format!("{API_ROOT}/clusters/{id}");
        self.0.get(&url).await?.expect_json()
    }

    /// `PATCH .../clusters/{id}`: update the attributes set in `cluster`.
    pub async fn update_cluster(&self, id: &str, cluster: &Cluster) -> Result<Cluster, Error> {
        let url = format!("{API_ROOT}/clusters/{id}");
        self.0.patch(&url, cluster).await?.expect_json()
    }

    /// `DELETE .../clusters/{id}`: start uninstalling the cluster.
    pub async fn delete_cluster(&self, id: &str) -> Result<(), Error> {
        let url = format!("{API_ROOT}/clusters/{id}");
        self.0.delete(&url).await?.nodata()
    }

    /// `GET .../clusters/{id}/status`
    pub async fn get_cluster_status(&self, id: &str) -> Result<ClusterStatus, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/status");
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../clusters/{id}/credentials`
    pub async fn get_credentials(&self, id: &str) -> Result<ClusterCredentials, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/credentials");
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../clusters/{id}/addons`
    pub async fn list_addon_installations(
        &self,
        id: &str,
    ) -> Result<List<AddOnInstallation>, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/addons");
        self.0.get(&url).await?.expect_json()
    }

    /// `POST .../clusters/{id}/addons`: install an add-on on the cluster.
    pub async fn install_addon(
        &self,
        id: &str,
        installation: &AddOnInstallation,
    ) -> Result<AddOnInstallation, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/addons");
        self.0.post(&url, installation).await?.expect_json()
    }

    /// `GET .../clusters/{id}/addons/{addon_id}`
    pub async fn get_addon_installation(
        &self,
        id: &str,
        addon_id: &str,
    ) -> Result<AddOnInstallation, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/addons/{addon_id}");
        self.0.get(&url).await?.expect_json()
    }

    /// `PATCH .../clusters/{id}/addons/{addon_id}`
    pub async fn update_addon_installation(
        &self,
        id: &str,
        addon_id: &str,
        installation: &AddOnInstallation,
    ) -> Result<AddOnInstallation, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/addons/{addon_id}");
        self.0.patch(&url, installation).await?.expect_json()
    }

    /// `DELETE .../clusters/{id}/addons/{addon_id}`
    pub async fn uninstall_addon(&self, id: &str, addon_id: &str) -> Result<(), Error> {
        let url = format!("{API_ROOT}/clusters/{id}/addons/{addon_id}");
        self.0.delete(&url).await?.nodata()
    }

    /// `GET .../clusters/{id}/machine_pools`
    pub async fn list_machine_pools(&self, id: &str) -> Result<List<MachinePool>, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/machine_pools");
        self.0.get(&url).await?.expect_json()
    }

    /// `POST .../clusters/{id}/machine_pools`
    pub async fn create_machine_pool(
        &self,
        id: &str,
        pool: &MachinePool,
    ) -> Result<MachinePool, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/machine_pools");
        self.0.post(&url, pool).await?.expect_json()
    }

    /// `GET .../clusters/{id}/machine_pools/{pool_id}`
    pub async fn get_machine_pool(&self, id: &str, pool_id: &str) -> Result<MachinePool, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/machine_pools/{pool_id}");
        self.0.get(&url).await?.expect_json()
    }

    /// `PATCH .../clusters/{id}/machine_pools/{pool_id}`
    pub async fn update_machine_pool(
        &self,
        id: &str,
        pool_id: &str,
        pool: &MachinePool,
    ) -> Result<MachinePool, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/machine_pools/{pool_id}");
        self.0.patch(&url, pool).await?.expect_json()
    }

    /// `DELETE .../clusters/{id}/machine_pools/{pool_id}`
    pub async fn delete_machine_pool(&self, id: &str, pool_id: &str) -> Result<(), Error> {
        let url = format!("{API_ROOT}/clusters/{id}/machine_pools/{pool_id}");
        self.0.delete(&url).await?.nodata()
    }

    /// `GET .../clusters/{id}/upgrade_policies`
    pub async fn list_upgrade_policies(&self, id: &str) -> Result<List<UpgradePolicy>, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/upgrade_policies");
        self.0.get(&url).await?.expect_json()
    }

    /// `POST .../clusters/{id}/upgrade_policies`
    pub async fn create_upgrade_policy(
        &self,
        id: &str,
        policy: &UpgradePolicy,
    ) -> Result<UpgradePolicy, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/upgrade_policies");
        self.0.post(&url, policy).await?.expect_json()
    }

    /// `GET .../clusters/{id}/upgrade_policies/{policy_id}`
    pub async fn get_upgrade_policy(
        &self,
        id: &str,
        policy_id: &str,
    ) -> Result<UpgradePolicy, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/upgrade_policies/{policy_id}");
        self.0.get(&url).await?.expect_json()
    }

    /// `PATCH .../clusters/{id}/upgrade_policies/{policy_id}`
    pub async fn update_upgrade_policy(
        &self,
        id: &str,
        policy_id: &str,
        policy: &UpgradePolicy,
    ) -> Result<UpgradePolicy, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/upgrade_policies/{policy_id}");
        self.0.patch(&url, policy).await?.expect_json()
    }

    /// `DELETE .../clusters/{id}/upgrade_policies/{policy_id}`
    pub async fn delete_upgrade_policy(&self, id: &str, policy_id: &str) -> Result<(), Error> {
        let url = format!("{API_ROOT}/clusters/{id}/upgrade_policies/{policy_id}");
        self.0.delete(&url).await?.nodata()
    }

    /// `GET .../clusters/{id}/upgrade_policies/{policy_id}/state`
    pub async fn get_upgrade_policy_state(
        &self,
        id: &str,
        policy_id: &str,
    ) -> Result<UpgradePolicyState, Error> {
        let url = format!("{API_ROOT}/clusters/{id}/upgrade_policies/{policy_id}/state");
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../cloud_providers`
    pub async fn list_cloud_providers(
        &self,
        params: ListParams,
    ) -> Result<List<CloudProvider>, Error> {
        let url = with_list_params(format!("{API_ROOT}/cloud_providers"), &params);
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../cloud_providers/{id}`
    pub async fn get_cloud_provider(&self, id: &str) -> Result<CloudProvider, Error> {
        let url = format!("{API_ROOT}/cloud_providers/{id}");
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../cloud_providers/{provider_id}/regions`
    pub async fn list_cloud_regions(
        &self,
        provider_id: &str,
        params: ListParams,
    ) -> Result<List<CloudRegion>, Error> {
        let url = with_list_params(
            format!("{API_ROOT}/cloud_providers/{provider_id}/regions"),
            &params,
        );
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../cloud_providers/{provider_id}/regions/{region_id}`
    pub async fn get_cloud_region(
        &self,
        provider_id: &str,
        region_id: &str,
    ) -> Result<CloudRegion, Error> {
        let url = format!("{API_ROOT}/cloud_providers/{provider_id}/regions/{region_id}");
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../versions`
    pub async fn list_versions(&self, params: ListParams) -> Result<List<Version>, Error> {
        let url = with_list_params(format!("{API_ROOT}/versions"), &params);
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../versions/{id}`
    pub async fn get_version(&self, id: &str) -> Result<Version, Error> {
        let url = format!("{API_ROOT}/versions/{id}");
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../addons`: the catalog of available add-ons.
    pub async fn list_addons(&self, params: ListParams) -> Result<List<AddOn>, Error> {
        let url = with_list_params(format!("{API_ROOT}/addons"), &params);
        self.0.get(&url).await?.expect_json()
    }

    /// `GET .../addons/{id}`
    pub async fn get_addon(&self, id: &str) -> Result<AddOn, Error> {
        let url = format!("{API_ROOT}/addons/{id}");
        self.0.get(&url).await?.expect_json()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::future::{ready, Ready};

    use cumulus_client::{HttpApiClient, HttpApiResponse};
    use futures::executor::block_on;
    use serde::Serialize;
    use serde_json::Value;

    use super::*;
    use crate::ClusterState;

    struct Call {
        method: http::Method,
        path_and_query: String,
        params: Option<Value>,
    }

    /// Hands out canned response bodies and records the requests made.
    struct FakeClient {
        calls: RefCell<Vec<Call>>,
        body: &'static str,
        status: u16,
    }

    impl FakeClient {
        fn json(body: &'static str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                body,
                status: 200,
            }
        }

        fn nodata() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                body: "",
                status: 204,
            }
        }
    }

    impl HttpApiClient for FakeClient {
        type ResponseFuture<'a>
            = Ready<Result<HttpApiResponse, Error>>
        where
            Self: 'a;

        fn request<'a, T>(
            &'a self,
            method: http::Method,
            path_and_query: &'a str,
            params: Option<T>,
        ) -> Self::ResponseFuture<'a>
        where
            T: Serialize + 'a,
        {
            self.calls.borrow_mut().push(Call {
                method,
                path_and_query: path_and_query.to_string(),
                params: params.map(|p| serde_json::to_value(p).unwrap()),
            });
            ready(Ok(HttpApiResponse {
                status: self.status,
                content_type: (!self.body.is_empty())
                    .then(|| "application/json".to_string()),
                body: self.body.as_bytes().to_vec(),
            }))
        }
    }

    #[test]
    fn list_clusters_query() {
        let client = ClustersMgmtClient(FakeClient::json(
            r#"{"kind":"ClusterList","page":1,"size":1,"total":1,
                "items":[{"kind":"Cluster","id":"1u2k3h4j5l","state":"ready"}]}"#,
        ));

        let params = ListParams::default()
            .search("name like 'osde2e-%'")
            .page(1);
        let clusters = block_on(client.list_clusters(params)).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters.items[0].state, Some(ClusterState::Ready));

        let calls = client.0.calls.borrow();
        assert_eq!(calls[0].method, http::Method::GET);
        assert_eq!(
            calls[0].path_and_query,
            "/api/clusters_mgmt/v1/clusters?page=1&search=name%20like%20%27osde2e%2D%25%27"
        );
        assert!(calls[0].params.is_none());
    }

    #[test]
    fn create_cluster_posts_payload() {
        let client = ClustersMgmtClient(FakeClient::json(
            r#"{"kind":"Cluster","id":"1u2k3h4j5l","name":"osde2e-abc12","state":"pending"}"#,
        ));

        let request = Cluster {
            name: Some("osde2e-abc12".to_string()),
            ..Default::default()
        };
        let cluster = block_on(client.create_cluster(&request)).unwrap();
        assert_eq!(cluster.id.as_deref(), Some("1u2k3h4j5l"));
        assert_eq!(cluster.state, Some(ClusterState::Pending));

        let calls = client.0.calls.borrow();
        assert_eq!(calls[0].method, http::Method::POST);
        assert_eq!(calls[0].path_and_query, "/api/clusters_mgmt/v1/clusters");
        assert_eq!(
            calls[0].params.as_ref().unwrap(),
            &serde_json::json!({"name": "osde2e-abc12"})
        );
    }

    #[test]
    fn delete_uses_nodata() {
        let client = ClustersMgmtClient(FakeClient::nodata());
        block_on(client.delete_machine_pool("1u2k3h4j5l", "worker-tests")).unwrap();

        let calls = client.0.calls.borrow();
        assert_eq!(calls[0].method, http::Method::DELETE);
        assert_eq!(
            calls[0].path_and_query,
            "/api/clusters_mgmt/v1/clusters/1u2k3h4j5l/machine_pools/worker-tests"
        );
    }

    #[test]
    fn update_upgrade_policy_patches() {
        let client = ClustersMgmtClient(FakeClient::json(
            r#"{"kind":"UpgradePolicy","id":"p1","next_run":"2026-08-25T06:00:00Z"}"#,
        ));

        let request = UpgradePolicy {
            next_run: Some("2026-08-25T06:00:00Z".to_string()),
            ..Default::default()
        };
        let policy = block_on(client.update_upgrade_policy("1u2k3h4j5l", "p1", &request)).unwrap();
        assert_eq!(policy.next_run.as_deref(), Some("2026-08-25T06:00:00Z"));

        let calls = client.0.calls.borrow();
        assert_eq!(calls[0].method, http::Method::PATCH);
        assert_eq!(
            calls[0].path_and_query,
            "/api/clusters_mgmt/v1/clusters/1u2k3h4j5l/upgrade_policies/p1"
        );
        assert_eq!(
            calls[0].params.as_ref().unwrap(),
            &serde_json::json!({"next_run": "2026-08-25T06:00:00Z"})
        );
    }

    #[test]
    fn upgrade_policy_state_path() {
        let client = ClustersMgmtClient(FakeClient::json(
            r#"{"kind":"UpgradePolicyState","value":"started"}"#,
        ));
        let state = block_on(client.get_upgrade_policy_state("1u2k3h4j5l", "p1")).unwrap();
        assert_eq!(
            state.value,
            Some(crate::UpgradePolicyValueState::Started)
        );

        let calls = client.0.calls.borrow();
        assert_eq!(
            calls[0].path_and_query,
            "/api/clusters_mgmt/v1/clusters/1u2k3h4j5l/upgrade_policies/p1/state"
        );
    }
}
