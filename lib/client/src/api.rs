use async_trait::async_trait;
use serde_json::Value;

use openhr_core::{ClientError, ListParams, ListPayload, ModuleGrant, Scope};

use crate::http::ApiClient;

/// Object-safe port the resource store talks through.
///
/// JSON values cross this boundary; typed decoding happens in the store
/// against each resource's record type. The seam exists so tests can
/// substitute an in-memory double and count calls.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn list(&self, path: &str, params: &ListParams)
        -> Result<ListPayload<Value>, ClientError>;

    async fn get(&self, path: &str) -> Result<Value, ClientError>;

    async fn create(&self, path: &str, body: Value) -> Result<Value, ClientError>;

    async fn update(&self, path: &str, body: Value) -> Result<Value, ClientError>;

    async fn delete(&self, path: &str) -> Result<(), ClientError>;
}

/// Port for resolving the current actor's permission set.
///
/// Split from [`ResourceApi`] because the permission context refreshes on
/// its own cadence, independent of any one resource store.
#[async_trait]
pub trait PermissionsApi: Send + Sync {
    async fn my_permissions(&self, scope: Scope) -> Result<Vec<ModuleGrant>, ClientError>;
}

#[async_trait]
impl PermissionsApi for ApiClient {
    async fn my_permissions(&self, scope: Scope) -> Result<Vec<ModuleGrant>, ClientError> {
        ApiClient::my_permissions(self, scope).await
    }
}

#[async_trait]
impl ResourceApi for ApiClient {
    async fn list(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<ListPayload<Value>, ClientError> {
        self.get_list(path, params).await
    }

    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.get_one(path).await
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.post(path, &body).await
    }

    async fn update(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.put(path, &body).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        ApiClient::delete(self, path).await
    }
}
