//! Ingestion-pipeline endpoints.

use crate::client::Client;
use crate::error::KbError;
use serde_json::{Value, json};

#[derive(Clone)]
pub struct RagApi {
    client: Client,
}

impl RagApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Kick off the ingestion pipeline for an uploaded file.
    pub async fn execute_pipeline(&self, file_id: i64) -> Result<Value, KbError> {
        self.client
            .post_json("/kb/rag/pipeline/execute", &json!({ "file_id": file_id }))
            .await?
            .data()
    }

    /// File extensions the pipeline can ingest.
    pub async fn supported_file_types(&self) -> Result<Vec<String>, KbError> {
        self.client
            .get("/kb/rag/pipeline/file-types")
            .await?
            .data()
    }
}
