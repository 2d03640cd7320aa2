use std::ops::Deref;

use bson::doc;
use eyre::{Context as _, Result};
use log::info;
use mongodb::{Client, Database};

/// Owned connection handle. Keeps the client alive for as long as any
/// store clone exists.
#[derive(Clone)]
pub struct Db {
    _client: Client,
    database: Database,
}

impl Db {
    pub(crate) async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to connect to MongoDB")?;
        let database = client.database(db_name);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to ping MongoDB")?;
        info!("connected to database {}", db_name);
        Ok(Db {
            _client: client,
            database,
        })
    }
}

impl Deref for Db {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.database
    }
}
