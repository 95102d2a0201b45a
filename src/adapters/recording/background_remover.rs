//! Recording adapter for the `BackgroundRemover` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::background_remover::{BackgroundRemover, RemovalRequest, RemoveFuture};

/// Delegates to an inner remover and records every call.
pub struct RecordingBackgroundRemover {
    inner: Box<dyn BackgroundRemover>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingBackgroundRemover {
    /// Wrap `inner`, writing interactions to `recorder`.
    pub fn new(inner: Box<dyn BackgroundRemover>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl BackgroundRemover for RecordingBackgroundRemover {
    fn remove(&self, request: &RemovalRequest) -> RemoveFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.remove(&request).await;
            record_result(&self.recorder, "background_remover", "remove", &request, &result);
            result
        })
    }
}
