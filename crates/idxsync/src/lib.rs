//! Declarative index management for document databases.
//!
//! Applications declare the indexes each collection should have as
//! [`CollectionIndexes`]. [`IndexEnsurer`] compares the declaration with the
//! indexes the [`Database`] reports, drops what is no longer declared, and
//! hands back a [`Continuation`] that creates what is missing.
//!
//! ```ignore
//! let ensurer = IndexEnsurer::new(db);
//!
//! ensurer
//!     .ensure(&[CollectionIndexes::new(
//!         "users",
//!         [Index::ascending("email").unique(true)],
//!     )])
//!     .await?;
//! ```

mod config;
pub use config::Config;

mod continuation;
pub use continuation::Continuation;

mod ensurer;
pub use ensurer::IndexEnsurer;

mod plan;
pub use plan::Plan;

pub use idxsync_core::{
    async_trait, bson, driver, err, schema, CollectionIndexes, Database, Direction, Error,
    Index, Key, Result,
};
