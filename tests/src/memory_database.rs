use idxsync::{
    async_trait,
    bson::{doc, Document},
    schema::{same_intent, PRIMARY_KEY_INDEX_NAME},
    Database, Error, Index, Result,
};
use indexmap::IndexMap;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use crate::ExecLog;

/// A database call, as recorded by [`MemoryDatabase`].
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseOp {
    ListCollectionNames,
    ListIndexes {
        collection: String,
    },
    CreateManyIndexes {
        collection: String,
        indexes: Vec<Index>,
    },
    DropOneIndex {
        collection: String,
        name: String,
    },
}

/// In-memory stand-in for a document database's index catalog.
///
/// Collections keep the order in which they were added. Every collection
/// starts out with the reserved `_id_` index, as on a real server.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    collections: Mutex<IndexMap<String, Vec<Document>>>,

    /// Log of all calls made through this database
    ops_log: Arc<Mutex<Vec<DatabaseOp>>>,

    /// Calls that fail instead of running
    failures: Mutex<HashSet<Failure>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Failure {
    Drop { collection: String, name: String },
    Create { collection: String },
    ListIndexes { collection: String },
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty collection holding only the `_id_` index.
    pub fn with_collection(self, collection: &str) -> Self {
        self.lock()
            .entry(collection.to_string())
            .or_insert_with(|| vec![primary_key_descriptor()]);
        self
    }

    /// Adds a raw index descriptor to `collection`, creating the collection
    /// when needed.
    pub fn with_descriptor(self, collection: &str, descriptor: Document) -> Self {
        self.lock()
            .entry(collection.to_string())
            .or_insert_with(|| vec![primary_key_descriptor()])
            .push(descriptor);
        self
    }

    /// Adds an index to `collection`, named as the database would name it
    /// unless the index carries its own name.
    pub fn with_index(self, collection: &str, index: Index) -> Self {
        let descriptor = stored_descriptor(&index);
        self.with_descriptor(collection, descriptor)
    }

    /// Makes dropping `name` on `collection` fail.
    pub fn fail_drop(self, collection: &str, name: &str) -> Self {
        self.fail(Failure::Drop {
            collection: collection.to_string(),
            name: name.to_string(),
        })
    }

    /// Makes creating indexes on `collection` fail.
    pub fn fail_create(self, collection: &str) -> Self {
        self.fail(Failure::Create {
            collection: collection.to_string(),
        })
    }

    /// Makes listing the indexes of `collection` fail.
    pub fn fail_list_indexes(self, collection: &str) -> Self {
        self.fail(Failure::ListIndexes {
            collection: collection.to_string(),
        })
    }

    /// Lets every call succeed again.
    pub fn clear_failures(&self) {
        self.failures
            .lock()
            .expect("failed to acquire failures lock")
            .clear();
    }

    fn fail(self, failure: Failure) -> Self {
        self.failures
            .lock()
            .expect("failed to acquire failures lock")
            .insert(failure);
        self
    }

    /// Get a handle to access the call log
    pub fn exec_log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    /// Current indexes of `collection`, parsed, including `_id_`.
    pub fn indexes(&self, collection: &str) -> Vec<Index> {
        self.lock()
            .get(collection)
            .map(|descriptors| {
                descriptors
                    .iter()
                    .map(|descriptor| Index::from_wire(descriptor).expect("invalid descriptor"))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names of the current indexes of `collection`, including `_id_`.
    pub fn index_names(&self, collection: &str) -> Vec<String> {
        self.lock()
            .get(collection)
            .map(|descriptors| {
                descriptors
                    .iter()
                    .filter_map(|descriptor| descriptor.get_str("name").ok())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, Vec<Document>>> {
        self.collections
            .lock()
            .expect("failed to acquire collections lock")
    }

    fn record(&self, op: DatabaseOp) {
        self.ops_log
            .lock()
            .expect("failed to acquire ops log lock")
            .push(op);
    }

    fn check(&self, failure: Failure) -> Result<()> {
        let failures = self.failures.lock().expect("failed to acquire failures lock");

        if failures.contains(&failure) {
            return Err(Error::driver_operation_failed(std::io::Error::other(
                format!("injected failure: {failure:?}"),
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn list_collection_names(&self) -> Result<Vec<String>> {
        self.record(DatabaseOp::ListCollectionNames);
        Ok(self.lock().keys().cloned().collect())
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<Document>> {
        self.record(DatabaseOp::ListIndexes {
            collection: collection.to_string(),
        });
        self.check(Failure::ListIndexes {
            collection: collection.to_string(),
        })?;

        Ok(self.lock().get(collection).cloned().unwrap_or_default())
    }

    async fn create_many_indexes(&self, collection: &str, indexes: &[Index]) -> Result<()> {
        self.record(DatabaseOp::CreateManyIndexes {
            collection: collection.to_string(),
            indexes: indexes.to_vec(),
        });
        self.check(Failure::Create {
            collection: collection.to_string(),
        })?;

        let mut collections = self.lock();
        let existing = collections
            .entry(collection.to_string())
            .or_insert_with(|| vec![primary_key_descriptor()]);

        // Validate the whole batch before applying any of it.
        let mut created: Vec<Document> = vec![];

        for index in indexes {
            let name = stored_name(index);
            let mut duplicate = false;

            for other in existing.iter().chain(created.iter()) {
                let Ok(other_index) = Index::from_wire(other) else {
                    continue;
                };

                let same_name = other_index.name.as_deref() == Some(name.as_str());

                if same_intent(&other_index, index) {
                    duplicate = true;
                } else if same_name || other_index.keys == index.keys {
                    return Err(Error::driver_operation_failed(std::io::Error::other(
                        format!(
                            "index {} conflicts with existing index {} on `{}`",
                            index, other_index, collection
                        ),
                    )));
                }
            }

            if !duplicate {
                created.push(stored_descriptor(index));
            }
        }

        existing.extend(created);
        Ok(())
    }

    async fn drop_one_index(&self, collection: &str, index_name: &str) -> Result<()> {
        self.record(DatabaseOp::DropOneIndex {
            collection: collection.to_string(),
            name: index_name.to_string(),
        });
        self.check(Failure::Drop {
            collection: collection.to_string(),
            name: index_name.to_string(),
        })?;

        if index_name == PRIMARY_KEY_INDEX_NAME {
            return Err(Error::driver_operation_failed(std::io::Error::other(
                "cannot drop _id index",
            )));
        }

        let mut collections = self.lock();
        let Some(existing) = collections.get_mut(collection) else {
            return Err(Error::driver_operation_failed(std::io::Error::other(
                format!("ns not found: {collection}"),
            )));
        };

        let before = existing.len();
        existing.retain(|descriptor| descriptor.get_str("name").ok() != Some(index_name));

        if existing.len() == before {
            return Err(Error::driver_operation_failed(std::io::Error::other(
                format!("index not found with name [{index_name}]"),
            )));
        }

        Ok(())
    }
}

fn primary_key_descriptor() -> Document {
    doc! {
        "v": 2,
        "key": { "_id": 1 },
        "name": PRIMARY_KEY_INDEX_NAME,
    }
}

fn stored_name(index: &Index) -> String {
    index
        .name
        .clone()
        .unwrap_or_else(|| index.default_name())
}

/// Descriptor as the database stores it: versioned and always named.
fn stored_descriptor(index: &Index) -> Document {
    let mut descriptor = doc! { "v": 2 };
    descriptor.extend(index.clone().named(stored_name(index)).to_descriptor());
    descriptor
}
