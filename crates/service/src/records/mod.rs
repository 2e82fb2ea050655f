//! Named JSON records and the process-wide store that holds them.
//!
//! - `record`: validated record type
//! - `repository`: trait seam consumed by the HTTP layer
//! - `store`: mutex-guarded in-memory implementation

pub mod record;
pub mod repository;
pub mod store;

pub use record::Record;
pub use repository::RecordRepository;
pub use store::InMemoryRecordStore;
