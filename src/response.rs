//! Response envelope shared by the after-response chain.
//!
//! The payload is a tagged variant decided at request time: a single JSON
//! value, or a lazy stream of decoded chunks for long-running generation
//! endpoints. Hooks receive the previous hook's (possibly replaced)
//! envelope and must return one for the next.

use crate::error::KbError;
use futures_util::Stream;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::pin::Pin;

/// Lazily decoded sequence of JSON chunks from a streaming response.
/// Finite (ends when the underlying body closes) and single-pass.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Value, KbError>> + Send>>;

/// Business code the backend uses for success in its uniform wrapper.
pub const API_SUCCESS_CODE: i64 = 200_000;

/// Uniform backend response wrapper: `{ code, msg, data }`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    /// Unwrap `data`, turning a non-success code into [`KbError::Api`].
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, KbError> {
        if self.code != API_SUCCESS_CODE {
            return Err(KbError::Api {
                code: self.code,
                message: self.msg,
            });
        }
        serde_json::from_value(self.data)
            .map_err(|e| KbError::Parse(format!("unexpected data shape: {e}")))
    }
}

/// Decoded response payload.
pub enum Payload {
    Json(Value),
    Stream(ChunkStream),
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(v) => f.debug_tuple("Json").field(v).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A successful (2xx) response after transport decoding.
#[derive(Debug)]
pub struct ResponseEnvelope {
    pub status: StatusCode,
    pub headers: HeaderMap,
    payload: Payload,
}

impl ResponseEnvelope {
    pub fn json_value(status: StatusCode, headers: HeaderMap, value: Value) -> Self {
        Self {
            status,
            headers,
            payload: Payload::Json(value),
        }
    }

    pub fn stream(status: StatusCode, headers: HeaderMap, chunks: ChunkStream) -> Self {
        Self {
            status,
            headers,
            payload: Payload::Stream(chunks),
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The JSON body, when this response was decoded in JSON mode.
    pub fn body(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Json(v) => Some(v),
            Payload::Stream(_) => None,
        }
    }

    /// Deserialize the whole JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, KbError> {
        let value = self
            .body()
            .ok_or_else(|| KbError::Parse("streaming response has no buffered body".into()))?;
        serde_json::from_value(value.clone()).map_err(|e| KbError::Parse(e.to_string()))
    }

    /// Decode the backend's `{ code, msg, data }` wrapper and unwrap `data`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, KbError> {
        self.json::<ApiEnvelope>()?.decode()
    }

    /// Take the chunk stream. Errors when the request was not made in
    /// streaming mode.
    pub fn into_stream(self) -> Result<ChunkStream, KbError> {
        match self.payload {
            Payload::Stream(chunks) => Ok(chunks),
            Payload::Json(_) => Err(KbError::Stream(
                "response was not requested in streaming mode".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> ResponseEnvelope {
        ResponseEnvelope::json_value(StatusCode::OK, HeaderMap::new(), value)
    }

    #[test]
    fn data_unwraps_success_envelope() {
        let resp = envelope(json!({"code": 200000, "msg": "success", "data": 42}));
        let id: i64 = resp.data().unwrap();
        assert_eq!(id, 42);
    }

    #[test]
    fn data_accepts_null_payload_as_unit() {
        let resp = envelope(json!({"code": 200000, "msg": "success", "data": null}));
        resp.data::<()>().unwrap();
    }

    #[test]
    fn data_maps_business_failure_to_api_error() {
        let resp = envelope(json!({"code": 500000, "msg": "system error", "data": null}));
        match resp.data::<i64>() {
            Err(KbError::Api { code, message }) => {
                assert_eq!(code, 500000);
                assert_eq!(message, "system error");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn into_stream_rejects_json_payload() {
        let resp = envelope(json!({}));
        assert!(matches!(resp.into_stream(), Err(KbError::Stream(_))));
    }
}
