//! Pipeline client: merges configuration, runs hook chains, dispatches.
//!
//! Every request follows the same path: merge base and call-site config,
//! fold through the before-request chain, dispatch over the transport,
//! then fold the outcome through the after-response chain (2xx) or the
//! on-error chain (everything else). Pre-send failures and HTTP-status
//! failures share the error path, so on-error hooks see every failure
//! kind uniformly.

use crate::config::ClientConfig;
use crate::error::KbError;
use crate::plugin::{Plugin, run_after_chain, run_before_chain, run_error_chain};
use crate::request::{RequestBody, RequestConfig, RequestOptions, ResponseMode};
use crate::response::ResponseEnvelope;
use crate::sse::stream_json_chunks;
use futures_util::TryStreamExt;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub struct ClientBuilder {
    config: ClientConfig,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            plugins: Vec::new(),
        }
    }

    /// Register a plugin. Registration order is preserved and is the
    /// execution order for all three hook kinds.
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    pub fn build(self) -> Result<Client, KbError> {
        let http = reqwest::Client::builder()
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| KbError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                config: self.config,
                plugins: self.plugins,
            }),
        })
    }
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    plugins: Vec<Arc<dyn Plugin>>,
}

/// Cheaply cloneable handle; clones share the transport and plugin set.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Issue a request through the full pipeline.
    ///
    /// Concurrent requests are independent pipeline instances; nothing
    /// request-local is shared between them.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseEnvelope, KbError> {
        let config = self.merge(method, path, options);
        match run_before_chain(&self.inner.plugins, config).await {
            Ok(config) => match self.dispatch(config).await {
                Ok(envelope) => run_after_chain(&self.inner.plugins, envelope).await,
                Err(error) => run_error_chain(&self.inner.plugins, error).await,
            },
            // Pre-send failure: no transport call, but the same error path.
            // A recovered pre-send error resolves directly, skipping the
            // after-response chain.
            Err(error) => run_error_chain(&self.inner.plugins, error).await,
        }
    }

    pub async fn get(&self, path: &str) -> Result<ResponseEnvelope, KbError> {
        self.request(Method::GET, path, RequestOptions::new()).await
    }

    pub async fn get_query(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<ResponseEnvelope, KbError> {
        self.request(Method::GET, path, RequestOptions::new().query(query))
            .await
    }

    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ResponseEnvelope, KbError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, RequestOptions::new().json(body))
            .await
    }

    pub async fn put_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ResponseEnvelope, KbError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, RequestOptions::new().json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseEnvelope, KbError> {
        self.request(Method::DELETE, path, RequestOptions::new())
            .await
    }

    pub async fn post_form(
        &self,
        path: &str,
        form: crate::request::MultipartForm,
    ) -> Result<ResponseEnvelope, KbError> {
        self.request(Method::POST, path, RequestOptions::new().form(form))
            .await
    }

    /// POST a JSON body and decode the response as a chunk stream.
    pub async fn post_stream<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ResponseEnvelope, KbError> {
        let body = serde_json::to_value(body)?;
        self.request(
            Method::POST,
            path,
            RequestOptions::new().json(body).streaming(),
        )
        .await
    }

    /// Merge base config with call-site options. Call-site headers override
    /// base headers; the base URL prefixes relative paths.
    fn merge(&self, method: Method, path: &str, options: RequestOptions) -> RequestConfig {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.inner.config.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        let mut headers = self.inner.config.default_headers.clone();
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        RequestConfig {
            method,
            url,
            headers,
            query: options.query,
            body: options.body,
            mode: options.mode,
        }
    }

    async fn dispatch(&self, config: RequestConfig) -> Result<ResponseEnvelope, KbError> {
        let streaming = config.mode == ResponseMode::Stream;
        tracing::debug!(
            target: "kb::http",
            method = %config.method,
            url = %config.url,
            stream = streaming,
            "sending request"
        );

        let mut builder = self
            .inner
            .http
            .request(config.method, config.url.as_str())
            .headers(config.headers);
        if !config.query.is_empty() {
            builder = builder.query(&config.query);
        }
        builder = match config.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(form) => builder.multipart(form.into_reqwest()?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| KbError::Network(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(target: "kb::http", status = status.as_u16(), "request failed");
            return Err(KbError::http(status.as_u16(), text));
        }

        tracing::debug!(target: "kb::http", status = status.as_u16(), "response received");

        match config.mode {
            ResponseMode::Stream => {
                let bytes = response
                    .bytes_stream()
                    .map_err(|e| KbError::Stream(format!("body stream error: {e}")));
                Ok(ResponseEnvelope::stream(
                    status,
                    headers,
                    stream_json_chunks(bytes),
                ))
            }
            ResponseMode::Json => {
                let text = response
                    .text()
                    .await
                    .map_err(|e| KbError::Network(format!("failed to read body: {e}")))?;
                let value = if text.trim().is_empty() {
                    Value::Null
                } else {
                    serde_json::from_str(&text)
                        .map_err(|e| KbError::Parse(format!("invalid JSON body: {e}")))?
                };
                Ok(ResponseEnvelope::json_value(status, headers, value))
            }
        }
    }
}
