use crate::{Config, Continuation, Plan};

use idxsync_core::{
    err, schema::verify_declaration, CollectionIndexes, Database, Error, Index, Result,
};

/// Reconciles declared indexes with the indexes a database reports.
///
/// Every call reads the database afresh and issues its remote calls one at a
/// time. Nothing guards against another process changing indexes between the
/// read and the writes, so reconciliation passes against the same database
/// must not overlap.
#[derive(Debug)]
pub struct IndexEnsurer {
    db: Box<dyn Database>,
    config: Config,
}

impl IndexEnsurer {
    pub fn new(db: impl Database + 'static) -> Self {
        Self::with_config(db, Config::default())
    }

    pub fn with_config(db: impl Database + 'static, config: Config) -> Self {
        Self {
            db: Box::new(db),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drops the extra indexes and returns a continuation holding the missing
    /// ones.
    ///
    /// The declaration is verified before the database is contacted, and
    /// every collection is observed before the first drop, so a malformed
    /// declaration or an unreadable index descriptor leaves the database
    /// untouched.
    ///
    /// Indexes that are not an ordering (`"text"`, `"2dsphere"`, `"hashed"`,
    /// ...) are left in place, with a warning, on collections the
    /// declaration does not mention. On a declared collection they fail the
    /// pass with an unsupported index kind error; narrow
    /// [`Config::collections`] to reconcile the rest of the database.
    pub async fn begin(&self, declared: &[CollectionIndexes]) -> Result<Continuation<'_>> {
        let plan = self.plan(declared).await?;

        let plan = if self.config.drop_extra {
            self.drop_extra(plan.extra()).await?;
            plan
        } else {
            for collection in plan.extra() {
                for index in collection.indexes() {
                    tracing::warn!(
                        collection = collection.collection(),
                        index = %index,
                        "keeping undeclared index"
                    );
                }
            }
            plan.without_extra()
        };

        Ok(Continuation::new(&*self.db, plan))
    }

    /// Drops the extra indexes and creates the missing ones.
    pub async fn ensure(&self, declared: &[CollectionIndexes]) -> Result<()> {
        self.begin(declared).await?.proceed().await
    }

    /// Computes what `begin` and `proceed` would do, without modifying the
    /// database.
    pub async fn plan(&self, declared: &[CollectionIndexes]) -> Result<Plan> {
        verify_declaration(declared)?;

        let declared: Vec<_> = declared
            .iter()
            .filter(|collection| self.config.includes(collection.collection()))
            .cloned()
            .collect();

        let observed = self.observe(&declared).await?;
        let plan = Plan::compute(&declared, &observed);

        Ok(plan)
    }

    /// Reads the indexes of every in-scope collection, without the reserved
    /// primary-key index.
    async fn observe(&self, declared: &[CollectionIndexes]) -> Result<Vec<CollectionIndexes>> {
        let mut observed = vec![];

        for name in self.db.list_collection_names().await? {
            if !self.config.includes(&name) {
                continue;
            }

            let is_declared = declared
                .iter()
                .any(|collection| collection.collection() == name);

            let mut indexes = vec![];

            for descriptor in self.db.list_indexes(&name).await? {
                match Index::from_wire(&descriptor) {
                    Ok(index) if index.is_primary_key() => {}
                    Ok(index) => indexes.push(index),
                    Err(e) if e.is_unsupported_index_kind() && !is_declared => {
                        tracing::warn!(
                            collection = %name,
                            index = ?descriptor.get("name"),
                            error = %e,
                            "leaving unsupported index in place"
                        );
                    }
                    Err(e) => {
                        return Err(e.context(err!("reading indexes of collection `{name}`")))
                    }
                }
            }

            tracing::debug!(collection = %name, indexes = indexes.len(), "observed indexes");

            observed.push(CollectionIndexes::new(name, indexes));
        }

        Ok(observed)
    }

    async fn drop_extra(&self, extra: &[CollectionIndexes]) -> Result<()> {
        // Indexes are dropped by name. Resolve every name before the first
        // drop is issued.
        let mut drops = vec![];

        for collection in extra {
            for index in collection.indexes() {
                let Some(name) = index.name() else {
                    return Err(Error::invalid_descriptor(format!(
                        "index {} on `{}` has no name",
                        index,
                        collection.collection()
                    )));
                };

                drops.push((collection.collection(), index, name));
            }
        }

        for (collection, index, name) in drops {
            tracing::info!(collection, index = %index, "dropping extra index");

            self.db
                .drop_one_index(collection, name)
                .await
                .map_err(|e| {
                    e.context(err!(
                        "dropping index `{name}` on collection `{collection}`"
                    ))
                })?;
        }

        Ok(())
    }
}
