use super::{contains_intent, CollectionIndexes, Index, Result};
use crate::Error;

use std::collections::HashSet;

struct Verify<'a> {
    declared: &'a [CollectionIndexes],
}

/// Checks a declared index set before it is reconciled against a database.
///
/// Every collection may be declared once, and every index needs at least one
/// key, distinct non-empty field names, and an intent not already declared for
/// the same collection.
pub fn verify_declaration(declared: &[CollectionIndexes]) -> Result<()> {
    Verify { declared }.verify()
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_collection_names_are_unique()?;

        for collection in self.declared {
            for index in collection.indexes() {
                self.verify_index_has_keys(collection, index)?;
                self.verify_index_fields(collection, index)?;
            }

            self.verify_intents_are_unique(collection)?;
            self.verify_index_names_are_unique(collection)?;
        }

        Ok(())
    }

    fn verify_collection_names_are_unique(&self) -> Result<()> {
        let mut names = HashSet::new();

        for collection in self.declared {
            if collection.collection().is_empty() {
                return Err(Error::invalid_declaration("collection name is empty"));
            }

            if !names.insert(collection.collection()) {
                return Err(Error::invalid_declaration(format!(
                    "collection `{}` is declared more than once",
                    collection.collection()
                )));
            }
        }

        Ok(())
    }

    fn verify_index_has_keys(&self, collection: &CollectionIndexes, index: &Index) -> Result<()> {
        if index.keys.is_empty() {
            return Err(Error::invalid_declaration(format!(
                "index {} on `{}` has no keys",
                index,
                collection.collection()
            )));
        }

        Ok(())
    }

    fn verify_index_fields(&self, collection: &CollectionIndexes, index: &Index) -> Result<()> {
        let mut fields = HashSet::new();

        for key in &index.keys {
            if key.field.is_empty() {
                return Err(Error::invalid_declaration(format!(
                    "index {} on `{}` has an empty field name",
                    index,
                    collection.collection()
                )));
            }

            if !fields.insert(key.field.as_str()) {
                return Err(Error::invalid_declaration(format!(
                    "index {} on `{}` lists field `{}` more than once",
                    index,
                    collection.collection(),
                    key.field
                )));
            }
        }

        Ok(())
    }

    fn verify_intents_are_unique(&self, collection: &CollectionIndexes) -> Result<()> {
        let indexes = collection.indexes();

        for (i, index) in indexes.iter().enumerate() {
            if contains_intent(&indexes[..i], index) {
                return Err(Error::invalid_declaration(format!(
                    "index {} is declared more than once on `{}`",
                    index,
                    collection.collection()
                )));
            }
        }

        Ok(())
    }

    fn verify_index_names_are_unique(&self, collection: &CollectionIndexes) -> Result<()> {
        let mut names = HashSet::new();

        for name in collection.indexes().iter().filter_map(Index::name) {
            if !names.insert(name) {
                return Err(Error::invalid_declaration(format!(
                    "index name `{}` is used more than once on `{}`",
                    name,
                    collection.collection()
                )));
            }
        }

        Ok(())
    }
}
