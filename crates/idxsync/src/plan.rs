use idxsync_core::{schema::contains_intent, CollectionIndexes, Index};

use indexmap::IndexMap;
use std::fmt;

/// Difference between the declared and the observed indexes.
///
/// `missing` holds declared indexes the database does not have, grouped by
/// collection in declaration order. `extra` holds observed indexes nothing
/// declares, grouped by collection in the order the database listed them.
/// Collections with nothing to do are omitted from both sides, and the
/// reserved `{_id: 1}` index never appears on either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    missing: Vec<CollectionIndexes>,
    extra: Vec<CollectionIndexes>,
}

impl Plan {
    pub fn new(missing: Vec<CollectionIndexes>, extra: Vec<CollectionIndexes>) -> Self {
        Self { missing, extra }
    }

    /// Diffs `declared` against `observed` using intent equality.
    ///
    /// A collection absent from `declared` has all of its observed indexes
    /// extra; a collection absent from `observed` has all of its declared
    /// indexes missing.
    pub fn compute(declared: &[CollectionIndexes], observed: &[CollectionIndexes]) -> Plan {
        let declared_by_name = by_collection(declared);
        let observed_by_name = by_collection(observed);

        let extra = observed
            .iter()
            .map(|collection| {
                let declared = declared_by_name
                    .get(collection.collection())
                    .copied()
                    .unwrap_or_default();
                subtract(collection, declared)
            })
            .filter(|collection| !collection.is_empty())
            .collect();

        let missing = declared
            .iter()
            .map(|collection| {
                let observed = observed_by_name
                    .get(collection.collection())
                    .copied()
                    .unwrap_or_default();
                subtract(collection, observed)
            })
            .filter(|collection| !collection.is_empty())
            .collect();

        Plan { missing, extra }
    }

    /// Declared indexes to create, per collection.
    pub fn missing(&self) -> &[CollectionIndexes] {
        &self.missing
    }

    /// Observed indexes to drop, per collection.
    pub fn extra(&self) -> &[CollectionIndexes] {
        &self.extra
    }

    /// Returns `true` when the database already matches the declaration.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    /// Returns a plan with the same missing side and no extra side.
    pub(crate) fn without_extra(self) -> Plan {
        Plan {
            missing: self.missing,
            extra: vec![],
        }
    }

    pub fn into_parts(self) -> (Vec<CollectionIndexes>, Vec<CollectionIndexes>) {
        (self.missing, self.extra)
    }
}

fn by_collection(sets: &[CollectionIndexes]) -> IndexMap<&str, &[Index]> {
    sets.iter()
        .map(|set| (set.collection(), set.indexes()))
        .collect()
}

/// Indexes of `from` with no same-intent match in `other`, skipping the
/// reserved primary-key index.
fn subtract(from: &CollectionIndexes, other: &[Index]) -> CollectionIndexes {
    CollectionIndexes::new(
        from.collection(),
        from.indexes()
            .iter()
            .filter(|index| !index.is_primary_key() && !contains_intent(other, index))
            .cloned(),
    )
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("indexes are up to date\n");
        }

        for collection in &self.extra {
            for index in collection.indexes() {
                writeln!(f, "- {}: drop {}", collection.collection(), index)?;
            }
        }

        for collection in &self.missing {
            for index in collection.indexes() {
                writeln!(f, "+ {}: create {}", collection.collection(), index)?;
            }
        }

        Ok(())
    }
}
