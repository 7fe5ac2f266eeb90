use anyhow::{bail, Context, Result};
use idxsync::{CollectionIndexes, Direction, Index, Key};
use serde::Deserialize;
use std::path::Path;

/// Indexes declared in a file, grouped by collection.
///
/// ```toml
/// [[collections]]
/// name = "users"
///
/// [[collections.indexes]]
/// keys = [{ field = "email", direction = "asc" }]
/// unique = true
/// name = "email_unique"
/// ```
///
/// The same shape is accepted as JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    #[serde(default)]
    collections: Vec<CollectionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CollectionEntry {
    name: String,

    #[serde(default)]
    indexes: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexEntry {
    keys: Vec<KeyEntry>,

    #[serde(default)]
    unique: bool,

    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyEntry {
    field: String,

    #[serde(default)]
    direction: DirectionEntry,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DirectionEntry {
    #[default]
    #[serde(alias = "ascending")]
    Asc,

    #[serde(alias = "descending")]
    Desc,
}

impl Declaration {
    /// Load a declaration file. The format follows the extension: `.toml`
    /// or `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading declaration file `{}`", path.display()))?;

        let declaration = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            Some("json") => Self::from_json(&contents),
            _ => bail!(
                "unsupported declaration file `{}`; expected a `.toml` or `.json` extension",
                path.display()
            ),
        };

        declaration.with_context(|| format!("parsing declaration file `{}`", path.display()))
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Converts the file contents into the engine's declaration. Validation
    /// is left to the engine.
    pub fn into_collections(self) -> Vec<CollectionIndexes> {
        self.collections
            .into_iter()
            .map(|collection| {
                CollectionIndexes::new(
                    collection.name,
                    collection.indexes.into_iter().map(IndexEntry::into_index),
                )
            })
            .collect()
    }
}

impl IndexEntry {
    fn into_index(self) -> Index {
        let mut index = Index::new(self.keys.into_iter().map(|key| {
            let direction = match key.direction {
                DirectionEntry::Asc => Direction::Ascending,
                DirectionEntry::Desc => Direction::Descending,
            };
            Key::new(key.field, direction)
        }))
        .unique(self.unique);

        index.name = self.name;
        index
    }
}
