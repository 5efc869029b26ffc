//! Request model handed through the plugin pipeline.
//!
//! A [`RequestConfig`] is fully merged (base config plus call-site options)
//! before the before-request chain runs. Hooks own it exclusively and may
//! mutate it; the transport takes it afterwards.

use crate::error::KbError;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// How the response body is decoded. Decided once per request at the call
/// site, never inferred from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Buffer the body and parse it as a single JSON value.
    #[default]
    Json,
    /// Decode the body incrementally as `data:`-prefixed JSON chunks.
    Stream,
}

/// One part of a multipart form body.
#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        data: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Ordered multipart form. Parts keep insertion order, and repeated field
/// names are allowed (the upload endpoint takes a repeated `files` field).
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type,
            data,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Number of parts carrying the given field name.
    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|p| p.name() == name).count()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub(crate) fn into_reqwest(self) -> Result<reqwest::multipart::Form, KbError> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    let mut p = reqwest::multipart::Part::bytes(data).file_name(file_name);
                    if let Some(ct) = content_type {
                        p = p.mime_str(&ct).map_err(|e| {
                            KbError::Configuration(format!("invalid content type: {e}"))
                        })?;
                    }
                    form.part(name, p)
                }
            };
        }
        Ok(form)
    }
}

/// Request body variants supported by the transport.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Form(MultipartForm),
}

/// A fully merged request. Mutable while owned by the before-request chain,
/// then handed to the transport.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    /// Absolute URL after base-URL merging.
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub mode: ResponseMode,
}

/// Call-site options merged into the client's base configuration.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub mode: ResponseMode,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn form(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Form(form);
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: reqwest::header::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Decode the response as a stream of JSON chunks instead of one value.
    pub fn streaming(mut self) -> Self {
        self.mode = ResponseMode::Stream;
        self
    }
}
