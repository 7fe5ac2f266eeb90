/// Configuration for index reconciliation
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, only these collections are observed and reconciled. Indexes
    /// on other collections are left untouched and declarations for other
    /// collections are ignored.
    pub collections: Option<Vec<String>>,

    /// When `false`, extra indexes are reported but never dropped.
    pub drop_extra: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collections: None,
            drop_extra: true,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict reconciliation to the given collections
    pub fn collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = Some(collections.into_iter().map(Into::into).collect());
        self
    }

    /// Set whether extra indexes are dropped
    pub fn drop_extra(mut self, drop_extra: bool) -> Self {
        self.drop_extra = drop_extra;
        self
    }

    /// Returns `true` if `collection` is in scope for reconciliation.
    pub fn includes(&self, collection: &str) -> bool {
        match &self.collections {
            Some(collections) => collections.iter().any(|name| name == collection),
            None => true,
        }
    }
}
