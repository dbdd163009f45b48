// ── Capability client ──
//
// The narrow CRUD contract the reconciler depends on. A session injects
// one implementation; the reconciler never builds or mutates it.

use std::future::Future;

use cloudbeaver_api::CloudBeaverClient;

use crate::error::CoreError;
use crate::model::Team;

/// Remote team CRUD.
///
/// Every successful call that returns a [`Team`] returns the server's
/// authoritative view of it.
pub trait TeamClient: Send + Sync {
    fn create_team(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> impl Future<Output = Result<Team, CoreError>> + Send;

    fn get_team(&self, id: &str) -> impl Future<Output = Result<Team, CoreError>> + Send;

    fn update_team(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> impl Future<Output = Result<Team, CoreError>> + Send;

    fn delete_team(&self, id: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl TeamClient for CloudBeaverClient {
    async fn create_team(&self, id: &str, name: &str, description: &str) -> Result<Team, CoreError> {
        Ok(CloudBeaverClient::create_team(self, id, name, description)
            .await?
            .into())
    }

    async fn get_team(&self, id: &str) -> Result<Team, CoreError> {
        Ok(CloudBeaverClient::get_team(self, id).await?.into())
    }

    async fn update_team(&self, id: &str, name: &str, description: &str) -> Result<Team, CoreError> {
        Ok(CloudBeaverClient::update_team(self, id, name, description)
            .await?
            .into())
    }

    async fn delete_team(&self, id: &str) -> Result<(), CoreError> {
        Ok(CloudBeaverClient::delete_team(self, id).await?)
    }
}
