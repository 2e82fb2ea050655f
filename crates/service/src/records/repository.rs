use crate::errors::ServiceError;
use crate::records::record::Record;

/// Trait abstraction for record storage.
///
/// Every method is atomic with respect to every other method on the same
/// instance. Reads hand back clones, never references into the store.
pub trait RecordRepository: Send + Sync {
    /// All records in insertion order.
    fn list_all(&self) -> Vec<Record>;
    /// Records whose name equals `name` exactly (zero or one).
    fn find_by_name(&self, name: &str) -> Vec<Record>;
    fn add(&self, record: Record) -> Result<(), ServiceError>;
    fn update(&self, record: Record) -> Result<(), ServiceError>;
    fn delete(&self, name: &str) -> Result<(), ServiceError>;

    /// Decode, validate and add a serialized record.
    fn add_json(&self, payload: &[u8]) -> Result<(), ServiceError> {
        self.add(Record::parse(payload)?)
    }

    /// Decode, validate and update a serialized record.
    fn update_json(&self, payload: &[u8]) -> Result<(), ServiceError> {
        self.update(Record::parse(payload)?)
    }
}
