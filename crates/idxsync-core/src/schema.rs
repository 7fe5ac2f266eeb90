mod collection;
pub use collection::CollectionIndexes;

mod index;
pub use index::{Index, PRIMARY_KEY_FIELD, PRIMARY_KEY_INDEX_NAME};

mod intent;
pub use intent::{contains_intent, same_intent};

mod key;
pub use key::{Direction, Key};

mod verify;
pub use verify::verify_declaration;

pub mod wire;

use crate::Result;
