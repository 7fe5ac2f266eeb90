use super::Index;

/// The indexes of one collection: either what the application declares or
/// what the database reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIndexes {
    collection: String,
    indexes: Vec<Index>,
}

impl CollectionIndexes {
    pub fn new(collection: impl Into<String>, indexes: impl IntoIterator<Item = Index>) -> Self {
        Self {
            collection: collection.into(),
            indexes: indexes.into_iter().collect(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn into_parts(self) -> (String, Vec<Index>) {
        (self.collection, self.indexes)
    }
}
