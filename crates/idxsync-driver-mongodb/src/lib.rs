mod index;

use idxsync_core::{async_trait, bson::Document, Database, Error, Index, Result};

use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client};

/// Database used when the connection URL does not name one.
const DEFAULT_DATABASE: &str = "test";

#[derive(Debug)]
pub struct MongoDb {
    client: Client,
    database: mongodb::Database,
}

impl MongoDb {
    pub fn new(client: Client, database: mongodb::Database) -> Self {
        Self { client, database }
    }

    /// Connects to the database named by `url`.
    ///
    /// Accepts any connection string the `mongodb` client does, including
    /// `mongodb+srv://` and multi-host replica-set URLs. The path names the
    /// database; `test` is used when it is empty.
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(url).await?;
        let name = database_name(&options).to_string();

        let client = Client::with_options(options)?;
        let database = client.database(&name);

        tracing::debug!(database = %name, "connected");

        Ok(Self { client, database })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &mongodb::Database {
        &self.database
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl Database for MongoDb {
    async fn list_collection_names(&self) -> Result<Vec<String>> {
        self.database
            .list_collection_names()
            .await
            .map_err(Error::driver_operation_failed)
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<Document>> {
        let models: Vec<_> = self
            .collection(collection)
            .list_indexes()
            .await
            .map_err(Error::driver_operation_failed)?
            .try_collect()
            .await
            .map_err(Error::driver_operation_failed)?;

        Ok(models.iter().map(index::model_to_descriptor).collect())
    }

    async fn create_many_indexes(&self, collection: &str, indexes: &[Index]) -> Result<()> {
        if indexes.is_empty() {
            return Ok(());
        }

        let models = indexes.iter().map(index::index_to_model).collect::<Vec<_>>();

        self.collection(collection)
            .create_indexes(models)
            .await
            .map_err(Error::driver_operation_failed)?;

        Ok(())
    }

    async fn drop_one_index(&self, collection: &str, index_name: &str) -> Result<()> {
        self.collection(collection)
            .drop_index(index_name)
            .await
            .map_err(Error::driver_operation_failed)
    }
}

fn database_name(options: &ClientOptions) -> &str {
    options
        .default_database
        .as_deref()
        .unwrap_or(DEFAULT_DATABASE)
}
