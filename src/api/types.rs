//! Wire types for the knowledge-base REST surface.

use serde::{Deserialize, Serialize};

/// Knowledge-base business space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BizSpace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// Vector-store collection backing this space.
    pub collection: String,
    pub desc: String,
}

/// File registered in a space, joined with its ingestion state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeFile {
    #[serde(default)]
    pub id: Option<i64>,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub file_url: String,
    pub created_at: String,
    pub user_id: i64,
    pub user_name: String,
    pub space_id: i64,
    pub space_name: String,
    pub collection: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 0 = inactive, 1 = active.
    pub status: i32,
    /// Ingestion state: 0 = pending, 1 = succeeded, 2 = failed.
    pub rag_status: i32,
    /// Ingestion message, set on failure.
    #[serde(default)]
    pub msg: Option<String>,
}

/// Paged query for the file listing endpoint.
#[derive(Debug, Clone, Copy)]
pub struct FileListQuery {
    pub page_size: u32,
    pub cur_page: u32,
    pub space_id: Option<i64>,
}

impl FileListQuery {
    /// Query pairs in the backend's camelCase naming.
    pub(crate) fn to_query(self) -> Vec<(String, String)> {
        let mut query = vec![
            ("pageSize".to_string(), self.page_size.to_string()),
            ("curPage".to_string(), self.cur_page.to_string()),
        ];
        if let Some(id) = self.space_id {
            query.push(("spaceId".to_string(), id.to_string()));
        }
        query
    }
}

/// Paged payload wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub total: i64,
    pub cur_page: u32,
    pub page_size: u32,
    pub list: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userInfo")]
    pub user_info: UserInfo,
}

/// Body for posting a chat message into a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct MessageCreate {
    pub role: String,
    pub content: String,
    pub conv_id: String,
}

impl MessageCreate {
    pub fn user(conv_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            conv_id: conv_id.into(),
        }
    }
}

/// Conversation list entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationSummary {
    pub conv_id: String,
    pub user_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
