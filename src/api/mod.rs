//! Typed wrappers around the knowledge-base REST surface.
//!
//! Each function maps one-to-one to an HTTP call: path, method, payload,
//! expected shape. No retries, no caching, no coordination; the plugin
//! pipeline underneath handles auth and failure reactions.

mod conversation;
mod file;
mod rag;
mod space;
mod types;
mod user;

pub use conversation::ConversationApi;
pub use file::{FileApi, UploadFile};
pub use rag::RagApi;
pub use space::SpaceApi;
pub use types::{
    BizSpace, ConversationSummary, FileListQuery, KnowledgeFile, LoginRequest, LoginResponse,
    MessageCreate, Page, UserInfo,
};
pub use user::UserApi;
