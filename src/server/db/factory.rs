use std::sync::Arc;

use anyhow::Result;

use super::config::DbConfig;
use super::sqlite::factory::SqliteFactory;
use super::Database;

pub struct DbFactory;

impl DbFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn build_db(&self, cfg: &DbConfig) -> Result<Arc<Database>> {
        let sqlite_factory = SqliteFactory::new();
        let sqlite = sqlite_factory.build_sqlite(&cfg.sqlite)?;

        let db = Database::new(sqlite);
        Ok(Arc::new(db))
    }
}
