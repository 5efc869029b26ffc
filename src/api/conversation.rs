//! Conversation endpoints, including the streaming chat call.

use crate::api::types::{ConversationSummary, MessageCreate, Page};
use crate::client::Client;
use crate::error::KbError;
use crate::response::ChunkStream;
use serde_json::{Value, json};

#[derive(Clone)]
pub struct ConversationApi {
    client: Client,
}

impl ConversationApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a conversation, returning its id.
    pub async fn create(&self) -> Result<String, KbError> {
        self.client
            .post_json("/conversation", &json!({}))
            .await?
            .data()
    }

    pub async fn get(&self, conv_id: &str) -> Result<ConversationSummary, KbError> {
        self.client
            .get(&format!("/conversation/{}", urlencoding::encode(conv_id)))
            .await?
            .data()
    }

    pub async fn page(
        &self,
        cur_page: u32,
        page_size: u32,
    ) -> Result<Page<ConversationSummary>, KbError> {
        self.client
            .get_query(
                "/conversation/page",
                vec![
                    ("cur_page".to_string(), cur_page.to_string()),
                    ("page_size".to_string(), page_size.to_string()),
                ],
            )
            .await?
            .data()
    }

    pub async fn update(&self, conv_id: &str, user_id: i64, title: &str) -> Result<(), KbError> {
        self.client
            .put_json(
                &format!("/conversation/{}", urlencoding::encode(conv_id)),
                &json!({ "conv_id": conv_id, "user_id": user_id, "title": title }),
            )
            .await?
            .data()
    }

    /// Delete conversations by id; the backend takes a comma-joined list.
    pub async fn delete(&self, conv_ids: &[&str]) -> Result<(), KbError> {
        let joined: Vec<String> = conv_ids
            .iter()
            .map(|id| urlencoding::encode(id).into_owned())
            .collect();
        self.client
            .delete(&format!("/conversation/{}", joined.join(",")))
            .await?
            .data()
    }

    pub async fn generate_title(&self, conv_id: &str) -> Result<String, KbError> {
        self.client
            .post_json(
                &format!("/conversation/{}/title", urlencoding::encode(conv_id)),
                &json!({}),
            )
            .await?
            .data()
    }

    pub async fn message_list(&self, conv_id: &str) -> Result<Vec<Value>, KbError> {
        self.client
            .get(&format!(
                "/conversation/{}/message/list",
                urlencoding::encode(conv_id)
            ))
            .await?
            .data()
    }

    /// Post a message and stream the generated reply as decoded JSON
    /// chunks. The stream ends when the backend closes it; dropping the
    /// stream aborts generation.
    pub async fn send_message(
        &self,
        conv_id: &str,
        message: &MessageCreate,
    ) -> Result<ChunkStream, KbError> {
        self.client
            .post_stream(
                &format!("/conversation/{}/message", urlencoding::encode(conv_id)),
                message,
            )
            .await?
            .into_stream()
    }
}
