//! # kb-client
//!
//! Typed async client for the knowledge-base web application's REST API.
//!
//! The crate is built around a small request pipeline: every call is
//! merged into a [`request::RequestConfig`], folded through each
//! registered [`plugin::Plugin`]'s before-request hook, dispatched over
//! `reqwest`, and the outcome folded through the after-response hooks
//! (2xx) or the on-error hooks (everything else). The bundled
//! [`auth::AuthPlugin`] injects the session's bearer token and reacts to
//! 401/403 responses; the typed APIs under [`api`] cover space, file,
//! ingestion-pipeline, user, and conversation endpoints, the last of
//! which streams its reply as incrementally decoded JSON chunks.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use kb_client::prelude::*;
//! use std::sync::Arc;
//!
//! # struct NoopNav; impl Navigator for NoopNav { fn navigate(&self, _: &str) {} }
//! # struct NoopNotify; impl Notifier for NoopNotify { fn notify_error(&self, _: &str) {} }
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(MemorySession::with_token("jwt-abc"));
//!     let client = Client::builder(ClientConfig::from_env()?)
//!         .with_plugin(AuthPlugin::new(
//!             session.clone(),
//!             Arc::new(NoopNav),
//!             Arc::new(NoopNotify),
//!         ))
//!         .build()?;
//!
//!     let spaces = SpaceApi::new(client.clone()).list_all().await?;
//!     println!("{} spaces", spaces.len());
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod cancel;
pub mod client;
pub mod config;
pub mod error;
pub mod plugin;
pub mod request;
pub mod response;
pub mod session;
pub mod sse;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::KbError;

/// Commonly used items.
pub mod prelude {
    pub use crate::api::{
        BizSpace, ConversationApi, FileApi, FileListQuery, KnowledgeFile, MessageCreate, RagApi,
        SpaceApi, UploadFile, UserApi,
    };
    pub use crate::auth::AuthPlugin;
    pub use crate::cancel::{CancelHandle, make_cancellable};
    pub use crate::client::{Client, ClientBuilder};
    pub use crate::config::ClientConfig;
    pub use crate::error::KbError;
    pub use crate::plugin::{ErrorFlow, Plugin};
    pub use crate::request::{MultipartForm, RequestOptions, ResponseMode};
    pub use crate::response::{ChunkStream, ResponseEnvelope};
    pub use crate::session::{MemorySession, Navigator, Notifier, SessionStore};
}
