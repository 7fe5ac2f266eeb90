use super::{Direction, Key};

use std::fmt;

/// Field covered by the database's reserved primary-key index.
pub const PRIMARY_KEY_FIELD: &str = "_id";

/// Name the database assigns to the reserved primary-key index.
pub const PRIMARY_KEY_INDEX_NAME: &str = "_id_";

/// An index definition, either declared by the application or observed on a
/// collection.
///
/// The derived `PartialEq` compares every field, including `name`. Use
/// [`same_intent`](super::same_intent) to decide whether two definitions
/// describe the same index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index {
    /// Indexed fields, in index order.
    pub keys: Vec<Key>,

    /// When `true`, indexed entries are unique
    pub unique: bool,

    /// Index name. Usually generated by the database when not declared.
    pub name: Option<String>,
}

impl Index {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            unique: false,
            name: None,
        }
    }

    /// Single-field ascending index.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new([Key::ascending(field)])
    }

    /// Single-field descending index.
    pub fn descending(field: impl Into<String>) -> Self {
        Self::new([Key::descending(field)])
    }

    /// Appends a key to the index.
    pub fn key(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.keys.push(Key::new(field, direction));
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` when this is the database-managed `{_id: 1}` index.
    pub fn is_primary_key(&self) -> bool {
        matches!(
            &self.keys[..],
            [Key { field, direction: Direction::Ascending }] if field == PRIMARY_KEY_FIELD
        )
    }

    /// Name the database generates for an unnamed index: each field joined
    /// with its direction code, e.g. `email_1_created_at_-1`.
    pub fn default_name(&self) -> String {
        self.keys
            .iter()
            .map(|key| format!("{}_{}", key.field, key.direction.code()))
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(key, f)?;
        }
        f.write_str(" }")?;

        if self.unique {
            f.write_str(" unique")?;
        }

        if let Some(name) = &self.name {
            write!(f, " ({name})")?;
        }

        Ok(())
    }
}
