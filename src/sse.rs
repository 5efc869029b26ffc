//! Incremental decoding of line-oriented event streams.
//!
//! The backend streams long-running generation output as `data:`-prefixed
//! events terminated by a `[DONE]` marker. Each payload is parsed as JSON
//! and yielded as soon as its bytes arrive; nothing is buffered beyond the
//! current event, which keeps first-chunk latency low.

use crate::error::KbError;
use crate::response::ChunkStream;
use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};

/// Payload that marks end-of-stream; never surfaced as a chunk.
const DONE_MARKER: &str = "[DONE]";

/// Convert a byte stream into a stream of decoded JSON chunks.
///
/// - Empty payloads and done markers are skipped.
/// - Payloads are parsed strictly; a parse failure yields one `Err` item
///   and ends the stream.
/// - The stream ends cleanly when the underlying bytes close.
pub fn stream_json_chunks<S, B, E>(byte_stream: S) -> ChunkStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let out = async_stream::stream! {
        let mut events = Box::pin(byte_stream.eventsource());

        while let Some(item) = events.next().await {
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(KbError::Stream(format!("event stream error: {e}")));
                    return;
                }
            };

            let data = event.data.trim();
            if data.is_empty() || data == DONE_MARKER {
                continue;
            }

            match serde_json::from_str(data) {
                Ok(value) => yield Ok(value),
                Err(e) => {
                    yield Err(KbError::Parse(format!("invalid stream chunk: {e}")));
                    return;
                }
            }
        }
    };

    Box::pin(out)
}
