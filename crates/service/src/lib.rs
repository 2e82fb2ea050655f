//! Service layer for the record store.
//! - Owns the in-memory collection of named JSON records.
//! - Validates payloads before any mutation is attempted.
//! - Reports every rejection through a typed `ServiceError`.

pub mod errors;
pub mod records;
