//! Conversion between [`Index`] and the database's native index descriptor.
//!
//! `listIndexes` reports one descriptor per index:
//!
//! ```text
//! {
//!   "v": 2,
//!   "key": { "email": 1, "created_at": -1 },
//!   "name": "email_1_created_at_-1",
//!   "unique": true
//! }
//! ```
//!
//! Key order inside `key` is the index order and is preserved in both
//! directions.

use super::{Direction, Index, Key, Result};
use crate::Error;

use bson::{Bson, Document};

impl Index {
    /// Returns the key document for this index: each field mapped to its
    /// direction code, in index order.
    pub fn to_wire(&self) -> Document {
        let mut keys = Document::new();
        for key in &self.keys {
            keys.insert(key.field.clone(), Bson::Int32(key.direction.code()));
        }
        keys
    }

    /// Returns the full descriptor used to create this index.
    pub fn to_descriptor(&self) -> Document {
        let mut descriptor = Document::new();
        descriptor.insert("key", self.to_wire());

        if let Some(name) = &self.name {
            descriptor.insert("name", name.clone());
        }

        if self.unique {
            descriptor.insert("unique", true);
        }

        descriptor
    }

    /// Reads an index from a descriptor reported by the database.
    pub fn from_wire(descriptor: &Document) -> Result<Index> {
        let Some(key) = descriptor.get("key") else {
            return Err(Error::invalid_descriptor("missing `key` document"));
        };

        let Bson::Document(key) = key else {
            return Err(Error::invalid_descriptor(format!(
                "`key` must be a document, found {:?}",
                key.element_type()
            )));
        };

        let keys = key
            .iter()
            .map(|(field, code)| Ok(Key::new(field.clone(), direction_from_wire(field, code)?)))
            .collect::<Result<Vec<_>>>()?;

        let name = match descriptor.get("name") {
            Some(Bson::String(name)) => Some(name.clone()),
            _ => None,
        };

        let unique = match descriptor.get("unique") {
            None | Some(Bson::Null) => false,
            Some(Bson::Boolean(unique)) => *unique,
            // Legacy descriptors may store the flag as a number.
            Some(Bson::Int32(v)) => *v != 0,
            Some(Bson::Int64(v)) => *v != 0,
            Some(Bson::Double(v)) => *v != 0.0,
            Some(other) => {
                return Err(Error::invalid_descriptor(format!(
                    "`unique` must be a boolean, found {:?}",
                    other.element_type()
                )))
            }
        };

        Ok(Index { keys, unique, name })
    }
}

/// Reads a direction from its numeric code. The sign decides; any other value
/// describes an index kind that is not an ordering.
fn direction_from_wire(field: &str, code: &Bson) -> Result<Direction> {
    let sign = match code {
        Bson::Int32(v) => v.signum() as f64,
        Bson::Int64(v) => v.signum() as f64,
        Bson::Double(v) if !v.is_nan() && *v != 0.0 => v.signum(),
        _ => 0.0,
    };

    if sign > 0.0 {
        Ok(Direction::Ascending)
    } else if sign < 0.0 {
        Ok(Direction::Descending)
    } else {
        Err(Error::unsupported_index_kind(field, code.to_string()))
    }
}
