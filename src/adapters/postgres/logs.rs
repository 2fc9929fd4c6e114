//! PostgreSQL operation-log writer
//!
//! Appends ETL audit rows to the `etl_logs` table. Rows are never updated
//! or deleted.

use crate::adapters::postgres::client::PgClient;
use crate::adapters::storage::OperationLogWriter;
use crate::domain::{OperationLogEntry, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Audit sink backed by the `etl_logs` table
pub struct PgOperationLogWriter {
    client: Arc<PgClient>,
}

impl PgOperationLogWriter {
    /// Create a writer over an existing client
    pub fn new(client: Arc<PgClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OperationLogWriter for PgOperationLogWriter {
    async fn record(&self, entry: &OperationLogEntry) -> Result<()> {
        let insert = r#"
            INSERT INTO etl_logs (
                operation_type, status, records_processed, execution_time, error_message
            )
            VALUES ($1, $2, $3, $4, $5)
        "#;

        self.client
            .execute(
                insert,
                &[
                    &entry.operation_type,
                    &entry.status.as_str(),
                    &entry.records_processed,
                    &entry.execution_time,
                    &entry.error_message,
                ],
            )
            .await?;

        tracing::debug!(
            operation = %entry.operation_type,
            status = %entry.status,
            records = entry.records_processed,
            "Appended operation log row"
        );

        Ok(())
    }
}
