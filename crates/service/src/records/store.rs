use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::errors::ServiceError;
use crate::records::record::Record;
use crate::records::repository::RecordRepository;

/// In-memory record store.
///
/// Keeps records in a `Vec` so listing follows insertion order. A single
/// exclusive lock guards the whole collection and is held for the full
/// duration of every operation, reads included.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: Mutex<Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // No operation panics between reading and writing the Vec, so a poisoned
    // guard still holds a consistent collection.
    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn position(records: &[Record], name: &str) -> Option<usize> {
    records.iter().position(|r| r.name() == name)
}

impl RecordRepository for InMemoryRecordStore {
    fn list_all(&self) -> Vec<Record> {
        self.lock().clone()
    }

    fn find_by_name(&self, name: &str) -> Vec<Record> {
        let records = self.lock();
        records.iter().filter(|r| r.name() == name).cloned().collect()
    }

    fn add(&self, record: Record) -> Result<(), ServiceError> {
        let mut records = self.lock();
        if position(&records, record.name()).is_some() {
            return Err(ServiceError::conflict(record.name()));
        }
        debug!(name = record.name(), total = records.len() + 1, "record added");
        records.push(record);
        Ok(())
    }

    fn update(&self, record: Record) -> Result<(), ServiceError> {
        let mut records = self.lock();
        let idx = position(&records, record.name()).ok_or_else(|| ServiceError::not_found(record.name()))?;
        debug!(name = record.name(), index = idx, "record updated");
        records[idx] = record;
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), ServiceError> {
        if name.is_empty() {
            return Err(ServiceError::invalid("need a name to delete a record!"));
        }
        let mut records = self.lock();
        let idx = position(&records, name).ok_or_else(|| ServiceError::not_found(name))?;
        records.remove(idx);
        debug!(name, total = records.len(), "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};

    fn rec(value: Value) -> Record {
        Record::try_from(value).expect("valid record")
    }

    fn names(store: &InMemoryRecordStore) -> Vec<String> {
        store.list_all().iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn add_then_find_round_trips() {
        let store = InMemoryRecordStore::new();
        let bob = rec(json!({"name": "bob", "age": 30}));
        store.add(bob.clone()).unwrap();

        assert_eq!(store.find_by_name("bob"), vec![bob]);
        assert!(store.find_by_name("Bob").is_empty(), "lookup is case-sensitive");
        assert!(store.find_by_name("alice").is_empty());
    }

    #[test]
    fn listing_is_stable_without_mutation() {
        let store = InMemoryRecordStore::new();
        for n in ["a", "b", "c"] {
            store.add(rec(json!({"name": n}))).unwrap();
        }
        assert_eq!(store.list_all(), store.list_all());
        assert_eq!(names(&store), ["a", "b", "c"]);
    }

    #[test]
    fn update_replaces_in_place() {
        let store = InMemoryRecordStore::new();
        for n in ["a", "b", "c"] {
            store.add(rec(json!({"name": n, "v": 1}))).unwrap();
        }
        store.update(rec(json!({"name": "b", "v": 2}))).unwrap();

        let all = store.list_all();
        assert_eq!(names(&store), ["a", "b", "c"]);
        assert_eq!(all[1].get("v"), Some(&json!(2)));
        assert_eq!(all[0].get("v"), Some(&json!(1)));
    }

    #[test]
    fn update_unknown_name_is_not_found() {
        let store = InMemoryRecordStore::new();
        store.add(rec(json!({"name": "a"}))).unwrap();
        let err = store.update(rec(json!({"name": "zz"}))).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("zz".into()));
        assert_eq!(names(&store), ["a"]);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let store = InMemoryRecordStore::new();
        store.add(rec(json!({"name": "x"}))).unwrap();
        store.add(rec(json!({"name": "y"}))).unwrap();

        store.delete("x").unwrap();
        assert_eq!(names(&store), ["y"]);
        assert_eq!(store.delete("x"), Err(ServiceError::NotFound("x".into())));
    }

    #[test]
    fn delete_requires_a_name() {
        let store = InMemoryRecordStore::new();
        assert!(matches!(store.delete(""), Err(ServiceError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_add_conflicts_and_keeps_original() {
        let store = InMemoryRecordStore::new();
        store.add(rec(json!({"name": "bob", "v": "first"}))).unwrap();
        let err = store.add(rec(json!({"name": "bob", "v": "second"}))).unwrap_err();

        assert_eq!(err, ServiceError::Conflict("bob".into()));
        let found = store.find_by_name("bob");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("v"), Some(&json!("first")));
    }

    #[test]
    fn invalid_payloads_leave_store_untouched() {
        let store = InMemoryRecordStore::new();
        store.add_json(br#"{"name": "keep"}"#).unwrap();

        assert!(matches!(store.add_json(b"[1, 2]"), Err(ServiceError::InvalidInput(_))));
        assert!(matches!(store.add_json(b"42"), Err(ServiceError::InvalidInput(_))));
        assert!(matches!(store.add_json(b"{not json"), Err(ServiceError::Parse(_))));
        assert!(matches!(store.update_json(br#"{"age": 3}"#), Err(ServiceError::InvalidInput(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn returned_records_are_snapshots() {
        let store = InMemoryRecordStore::new();
        store.add(rec(json!({"name": "a", "v": 1}))).unwrap();
        let before = store.list_all();

        store.update(rec(json!({"name": "a", "v": 2}))).unwrap();
        store.add(rec(json!({"name": "b"}))).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].get("v"), Some(&json!(1)));
    }

    #[test]
    fn concurrent_duplicate_adds_yield_one_success() {
        for _ in 0..50 {
            let store = Arc::new(InMemoryRecordStore::new());
            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = (0..2)
                .map(|i| {
                    let store = Arc::clone(&store);
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        store.add(rec(json!({"name": "race", "by": i})))
                    })
                })
                .collect();
            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert_eq!(results.iter().filter(|r| matches!(r, Err(ServiceError::Conflict(_)))).count(), 1);
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn names_stay_unique_under_mixed_concurrent_load() {
        let store = Arc::new(InMemoryRecordStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let name = format!("n{}", i % 10);
                        let _ = store.add(rec(json!({"name": name, "t": t})));
                        let _ = store.update(rec(json!({"name": name, "t": t, "i": i})));
                        if i % 3 == 0 {
                            let _ = store.delete(&name);
                        }
                        let _ = store.list_all();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let all = store.list_all();
        let unique: HashSet<_> = all.iter().map(|r| r.name().to_string()).collect();
        assert_eq!(unique.len(), all.len());
    }
}
