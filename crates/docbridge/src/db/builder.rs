use super::{Db, Options, Shared};
use crate::schema::Catalog;

use docbridge_core::{driver::Driver, Result};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    options: Options,
}

impl Builder {
    /// Replaces every option at once.
    pub fn options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// Set the schema of collections named without one
    pub fn default_schema(&mut self, schema: impl Into<String>) -> &mut Self {
        self.options.default_schema = schema.into();
        self
    }

    /// Set the optimistic-concurrency version column
    pub fn version_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.options.version_column = column.into();
        self
    }

    /// Set the database name used in identifier namespaces instead of
    /// querying it from the connection.
    pub fn database(&mut self, database: impl Into<String>) -> &mut Self {
        self.options.database = Some(database.into());
        self
    }

    #[cfg(feature = "postgresql")]
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = docbridge_driver_postgresql::PostgreSQL::connect(url).await?;
        self.build(driver).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let driver: Arc<dyn Driver> = Arc::new(driver);
        let catalog = Catalog::new(driver.clone(), &self.options.default_schema);

        let database = match &self.options.database {
            Some(database) => database.clone(),
            None => catalog.current_database().await?,
        };

        tracing::info!(database = %database, "datastore is ready");

        Ok(Db {
            shared: Arc::new(Shared {
                driver,
                catalog,
                database,
                version_column: self.options.version_column.clone(),
            }),
        })
    }
}
