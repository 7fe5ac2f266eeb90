use super::Index;

/// Returns `true` when `a` and `b` describe the same index: identical key
/// sequences (field and direction, in order) and the same uniqueness.
///
/// Names are ignored. The database generates a name for every index that was
/// created without one, so an observed index rarely carries the declared
/// name.
pub fn same_intent(a: &Index, b: &Index) -> bool {
    a.keys == b.keys && a.unique == b.unique
}

/// Returns `true` when `indexes` holds an index with the same intent as
/// `index`.
pub fn contains_intent(indexes: &[Index], index: &Index) -> bool {
    indexes.iter().any(|candidate| same_intent(candidate, index))
}

impl Index {
    /// See [`same_intent`].
    pub fn same_intent(&self, other: &Index) -> bool {
        same_intent(self, other)
    }
}
