//! Bearer-token authentication plugin.
//!
//! Attaches the session's token to every outgoing request and reacts to
//! auth failures with logout / navigation / notification side effects.
//! Reacting is all it does: the failure always propagates to the caller
//! afterwards; this plugin never substitutes a success value.

use crate::error::{GENERIC_ERROR_DETAIL, KbError};
use crate::plugin::{ErrorFlow, Plugin};
use crate::request::RequestConfig;
use crate::session::{Navigator, Notifier, SessionStore};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// View the navigator is sent to when the backend answers 403.
pub const FORBIDDEN_VIEW: &str = "403";

pub struct AuthPlugin {
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl AuthPlugin {
    pub fn new(
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            navigator,
            notifier,
        }
    }
}

#[async_trait::async_trait]
impl Plugin for AuthPlugin {
    fn name(&self) -> &str {
        "auth"
    }

    /// Sets `authorization: Bearer <token>` when the session holds a
    /// non-empty token; otherwise leaves the headers untouched. Never
    /// blocks and never mutates session state.
    async fn before_request(&self, mut config: RequestConfig) -> Result<RequestConfig, KbError> {
        if let Some(token) = self.session.token() {
            let token = token.expose_secret();
            if !token.is_empty() {
                let value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| KbError::PreSend(format!("invalid bearer token: {e}")))?;
                config.headers.insert(AUTHORIZATION, value);
            }
        }
        Ok(config)
    }

    async fn on_error(&self, error: KbError) -> ErrorFlow {
        match error.status() {
            Some(403) => {
                tracing::debug!(target: "kb::http", "forbidden response, redirecting");
                self.navigator.navigate(FORBIDDEN_VIEW);
                self.notifier.notify_error(error.display_detail());
            }
            Some(401) => {
                tracing::debug!(target: "kb::http", "unauthorized response, clearing session");
                self.session.logout();
                self.session.request_login();
                self.notifier.notify_error(error.display_detail());
            }
            _ => {
                self.notifier.notify_error(GENERIC_ERROR_DETAIL);
            }
        }
        ErrorFlow::Propagate(error)
    }
}
