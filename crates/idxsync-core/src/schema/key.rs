use std::fmt;

/// Sort order of one indexed field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One field of an index, together with its sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// Name of the indexed field. Dotted paths address embedded fields.
    pub field: String,

    pub direction: Direction,
}

impl Direction {
    /// Numeric code used by the database to describe this direction.
    pub const fn code(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }

    pub fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

impl Key {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Descending)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.direction.code())
    }
}
