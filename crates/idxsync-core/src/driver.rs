use crate::{async_trait, schema::Index, Result};

use bson::Document;
use std::{fmt::Debug, sync::Arc};

/// Index administration capabilities of a document database.
///
/// This is everything the reconciliation engine needs from the database. A
/// production implementation adapts a real client; tests supply an in-memory
/// fake. Implementations report failures with
/// [`Error::driver_operation_failed`](crate::Error::driver_operation_failed).
#[async_trait]
pub trait Database: Debug + Send + Sync {
    /// Names of all collections in the database. Order carries no meaning.
    async fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Native descriptors of every index on `collection`. Each exposes at
    /// least `key` (ordered field to direction map) and `name`.
    async fn list_indexes(&self, collection: &str) -> Result<Vec<Document>>;

    /// Creates all of `indexes` on `collection`.
    async fn create_many_indexes(&self, collection: &str, indexes: &[Index]) -> Result<()>;

    /// Drops the index called `index_name`. Fails when no such index exists.
    async fn drop_one_index(&self, collection: &str, index_name: &str) -> Result<()>;
}

macro_rules! forward_database {
    ($($ty:ty),*) => {$(
        #[async_trait]
        impl<D: Database + ?Sized> Database for $ty {
            async fn list_collection_names(&self) -> Result<Vec<String>> {
                (**self).list_collection_names().await
            }

            async fn list_indexes(&self, collection: &str) -> Result<Vec<Document>> {
                (**self).list_indexes(collection).await
            }

            async fn create_many_indexes(&self, collection: &str, indexes: &[Index]) -> Result<()> {
                (**self).create_many_indexes(collection, indexes).await
            }

            async fn drop_one_index(&self, collection: &str, index_name: &str) -> Result<()> {
                (**self).drop_one_index(collection, index_name).await
            }
        }
    )*};
}

forward_database!(Box<D>, Arc<D>);
