use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Field that identifies a record inside the store.
pub const NAME_FIELD: &str = "name";

/// A JSON object carrying a non-empty string `name`.
///
/// The only way to build one is through [`Record::parse`] or
/// `TryFrom<Value>`, so any `Record` in hand has already passed validation.
/// All other fields are kept as-is and never interpreted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Decode raw bytes and validate the result.
    ///
    /// Malformed JSON is reported as [`ServiceError::Parse`]; well-formed JSON
    /// of the wrong shape as [`ServiceError::InvalidInput`].
    pub fn parse(bytes: &[u8]) -> Result<Self, ServiceError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::try_from(value)
    }

    pub fn name(&self) -> &str {
        self.fields
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

}

impl TryFrom<Value> for Record {
    type Error = ServiceError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(fields) = value else {
            return Err(ServiceError::invalid("expecting a dictionary with a name"));
        };
        match fields.get(NAME_FIELD) {
            Some(Value::String(name)) if !name.is_empty() => Ok(Self { fields }),
            Some(Value::String(_)) => Err(ServiceError::invalid("record name must not be empty")),
            Some(_) => Err(ServiceError::invalid("record name must be a string")),
            None => Err(ServiceError::invalid("expecting a dictionary with a name")),
        }
    }
}
