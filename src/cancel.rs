//! Cancellation handles for streaming responses.
//!
//! Navigating away mid-generation should stop consumption immediately:
//! a cancelled stream yields no further chunks, and dropping it closes the
//! underlying HTTP connection so the backend stops producing.

use crate::response::ChunkStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Request cancellation. The wrapped stream stops at the next chunk
    /// boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Make a chunk stream cancellable and return its cancel handle.
pub fn make_cancellable(stream: ChunkStream) -> (ChunkStream, CancelHandle) {
    let flag = Arc::new(AtomicBool::new(false));
    let handle = CancelHandle::new(flag.clone());
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures_util::StreamExt;
        while let Some(item) = inner.next().await {
            if flag.load(Ordering::SeqCst) {
                break;
            }
            yield item;
        }
    };
    (Box::pin(s), handle)
}
