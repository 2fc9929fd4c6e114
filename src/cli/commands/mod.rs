//! CLI command implementations

pub mod init;
pub mod run;
pub mod status;

use crate::adapters::postgres::{PgClient, PgOperationLogWriter, PgRecipeStore};
use crate::config::LarderConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Connect to PostgreSQL and assemble the store with its audit sink
pub(crate) async fn connect_store(
    config: &LarderConfig,
) -> Result<(Arc<PgClient>, Arc<PgRecipeStore>)> {
    let client = Arc::new(PgClient::new(config.database.clone())?);
    client.test_connection().await?;

    let logs = Arc::new(PgOperationLogWriter::new(client.clone()));
    let store = Arc::new(PgRecipeStore::new(client.clone(), logs));

    Ok((client, store))
}
