//! File upload, listing, and deletion endpoints.

use crate::api::types::{FileListQuery, KnowledgeFile, Page};
use crate::client::Client;
use crate::error::KbError;
use crate::request::MultipartForm;
use serde_json::Value;

/// A file staged for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    fn content_type(&self) -> Option<String> {
        mime_guess::from_path(&self.file_name)
            .first()
            .map(|m| m.to_string())
    }
}

/// Build the upload form: one repeated `files` part per file, in order,
/// plus a single `description` part when provided.
pub(crate) fn build_upload_form(files: Vec<UploadFile>, description: Option<&str>) -> MultipartForm {
    let mut form = MultipartForm::new();
    for file in files {
        let content_type = file.content_type();
        form = form.file("files", file.file_name, content_type, file.data);
    }
    if let Some(description) = description {
        form = form.text("description", description);
    }
    form
}

#[derive(Clone)]
pub struct FileApi {
    client: Client,
}

impl FileApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Upload files into a space.
    pub async fn upload(
        &self,
        space_id: i64,
        files: Vec<UploadFile>,
        description: Option<&str>,
    ) -> Result<Value, KbError> {
        let form = build_upload_form(files, description);
        self.client
            .post_form(&format!("/kb/space/{space_id}/file"), form)
            .await?
            .data()
    }

    pub async fn list(&self, query: FileListQuery) -> Result<Page<KnowledgeFile>, KbError> {
        self.client
            .get_query("/kb/file/list", query.to_query())
            .await?
            .data()
    }

    pub async fn delete(&self, file_id: i64) -> Result<(), KbError> {
        self.client
            .delete(&format!("/kb/file/{file_id}"))
            .await?
            .data()
    }
}
