//! Replaying adapter for the `BackgroundRemover` port.

use std::sync::{Arc, Mutex};

use super::replay_next;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::background_remover::{
    BackgroundRemover, RemovalRequest, RemoveFuture, RemovedImage,
};

/// Serves recorded removal results from a cassette.
pub struct ReplayingBackgroundRemover {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingBackgroundRemover {
    /// Create a replaying remover backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl BackgroundRemover for ReplayingBackgroundRemover {
    fn remove(&self, _request: &RemovalRequest) -> RemoveFuture<'_> {
        let result = replay_next::<RemovedImage>(&self.replayer, "background_remover", "remove");
        Box::pin(async move { result })
    }
}
