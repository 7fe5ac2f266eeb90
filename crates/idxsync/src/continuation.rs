use crate::Plan;

use idxsync_core::{err, CollectionIndexes, Database, Result};

/// The deferred half of a reconciliation pass.
///
/// Returned by [`IndexEnsurer::begin`](crate::IndexEnsurer::begin) after the
/// extra indexes have been dropped. Either [`proceed`](Self::proceed) to create
/// the missing indexes, or [`rollback`](Self::rollback) to recreate the
/// dropped ones. Both consume the continuation.
#[derive(Debug)]
#[must_use = "missing indexes are only created by `proceed`"]
pub struct Continuation<'a> {
    db: &'a dyn Database,
    plan: Plan,
}

impl<'a> Continuation<'a> {
    pub(crate) fn new(db: &'a dyn Database, plan: Plan) -> Self {
        Self { db, plan }
    }

    /// Declared indexes that `proceed` will create.
    pub fn missing(&self) -> &[CollectionIndexes] {
        self.plan.missing()
    }

    /// Indexes dropped by `begin`, which `rollback` will recreate.
    pub fn extra(&self) -> &[CollectionIndexes] {
        self.plan.extra()
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Discards the continuation without touching the database.
    pub fn into_plan(self) -> Plan {
        self.plan
    }

    /// Creates the missing indexes, one call per collection.
    pub async fn proceed(self) -> Result<()> {
        create_indexes(self.db, self.plan.missing(), "creating missing indexes").await
    }

    /// Recreates the indexes dropped by `begin`, with the shape and name they
    /// had when observed. Indexes created by an earlier `proceed` are not
    /// removed.
    pub async fn rollback(self) -> Result<()> {
        create_indexes(self.db, self.plan.extra(), "restoring dropped indexes").await
    }
}

async fn create_indexes(
    db: &dyn Database,
    collections: &[CollectionIndexes],
    action: &str,
) -> Result<()> {
    for collection in collections {
        for index in collection.indexes() {
            tracing::info!(
                collection = collection.collection(),
                index = %index,
                "{action}"
            );
        }

        db.create_many_indexes(collection.collection(), collection.indexes())
            .await
            .map_err(|e| {
                e.context(err!(
                    "{action} on collection `{}`",
                    collection.collection()
                ))
            })?;
    }

    Ok(())
}
