//! Space management endpoints.

use crate::api::types::BizSpace;
use crate::client::Client;
use crate::error::KbError;

#[derive(Clone)]
pub struct SpaceApi {
    client: Client,
}

impl SpaceApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a space, returning its id.
    pub async fn create(&self, space: &BizSpace) -> Result<i64, KbError> {
        self.client.post_json("/kb/space", space).await?.data()
    }

    pub async fn list_all(&self) -> Result<Vec<BizSpace>, KbError> {
        self.client.get("/kb/space/list").await?.data()
    }

    pub async fn get(&self, id: i64) -> Result<BizSpace, KbError> {
        self.client.get(&format!("/kb/space/{id}")).await?.data()
    }

    pub async fn update(&self, id: i64, space: &BizSpace) -> Result<(), KbError> {
        self.client
            .put_json(&format!("/kb/space/{id}"), space)
            .await?
            .data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), KbError> {
        self.client.delete(&format!("/kb/space/{id}")).await?.data()
    }
}
