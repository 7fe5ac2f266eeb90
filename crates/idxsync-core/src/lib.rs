pub mod driver;
pub use driver::Database;

mod error;
pub use error::Error;

pub mod schema;
pub use schema::{CollectionIndexes, Direction, Index, Key};

/// A Result type alias that uses idxsync's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
pub use bson;
