//! Request plugin pipeline.
//!
//! A plugin bundles up to three hooks around the transport: before-request,
//! after-response, and on-error. Plugins are registered once per client and
//! run in registration order for every request that client issues;
//! registration order is the only ordering guarantee. Hooks are awaited
//! strictly sequentially, never in parallel.
//!
//! Control flow is explicit: each stage threads a result through an ordered
//! loop rather than relying on exception chaining. An on-error hook either
//! recovers (substituting a success envelope, which short-circuits the
//! chain) or propagates the possibly annotated error to the next hook.

use crate::error::KbError;
use crate::request::RequestConfig;
use crate::response::ResponseEnvelope;
use std::sync::Arc;

/// Outcome of an on-error hook.
#[derive(Debug)]
pub enum ErrorFlow {
    /// Substitute a success value and stop error propagation.
    Recover(ResponseEnvelope),
    /// Hand the (possibly annotated) error to the next hook.
    Propagate(KbError),
}

/// A named bundle of pipeline hooks. All hooks are optional and default to
/// pass-through.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Runs before the transport call. May mutate the config. An error here
    /// aborts the request without any network traffic and is routed to the
    /// on-error chain as a pre-send failure.
    async fn before_request(&self, config: RequestConfig) -> Result<RequestConfig, KbError> {
        Ok(config)
    }

    /// Runs after a successful (2xx) response, receiving the previous
    /// hook's (possibly replaced) envelope.
    async fn after_response(
        &self,
        response: ResponseEnvelope,
    ) -> Result<ResponseEnvelope, KbError> {
        Ok(response)
    }

    /// Runs for every failure kind uniformly: pre-send, network-level, or
    /// HTTP error status.
    async fn on_error(&self, error: KbError) -> ErrorFlow {
        ErrorFlow::Propagate(error)
    }
}

/// Fold the request config through every before-request hook in
/// registration order. The first hook error aborts the fold.
pub async fn run_before_chain(
    plugins: &[Arc<dyn Plugin>],
    mut config: RequestConfig,
) -> Result<RequestConfig, KbError> {
    for plugin in plugins {
        config = plugin.before_request(config).await?;
    }
    Ok(config)
}

/// Fold the response envelope through every after-response hook in
/// registration order.
pub async fn run_after_chain(
    plugins: &[Arc<dyn Plugin>],
    mut response: ResponseEnvelope,
) -> Result<ResponseEnvelope, KbError> {
    for plugin in plugins {
        response = plugin.after_response(response).await?;
    }
    Ok(response)
}

/// Pass a failure through every on-error hook in registration order.
/// Recovery short-circuits with the substitute envelope; exhaustion rejects
/// with the final error.
pub async fn run_error_chain(
    plugins: &[Arc<dyn Plugin>],
    mut error: KbError,
) -> Result<ResponseEnvelope, KbError> {
    for plugin in plugins {
        match plugin.on_error(error).await {
            ErrorFlow::Recover(envelope) => {
                tracing::debug!(target: "kb::http", plugin = plugin.name(), "recovered from error");
                return Ok(envelope);
            }
            ErrorFlow::Propagate(next) => error = next,
        }
    }
    Err(error)
}
