use std::sync::Arc;

use service::records::{InMemoryRecordStore, RecordRepository};

use crate::shutdown::Shutdown;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub records: Arc<dyn RecordRepository>,
    /// `None` when the host cannot stop the server on request.
    pub shutdown: Option<Shutdown>,
}

impl ServerState {
    pub fn new(records: Arc<dyn RecordRepository>, shutdown: Option<Shutdown>) -> Self {
        Self { records, shutdown }
    }

    /// Fresh empty store wired to the given shutdown handle.
    pub fn in_memory(shutdown: Option<Shutdown>) -> Self {
        Self::new(Arc::new(InMemoryRecordStore::new()), shutdown)
    }
}
