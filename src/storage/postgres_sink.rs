use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::models::TransactionRecord;
use crate::storage::{SinkError, TransactionSink};

const INSERT_TRANSACTION_RECORDS: &str =
    "INSERT INTO transaction_record (account_number, trx_amount, description, trx_date, trx_time, customer_id, version) ";

const COLUMNS_PER_RECORD: usize = 7;
/// Postgres caps a single statement at 65535 bind parameters.
const MAX_BIND_PARAMETERS: usize = u16::MAX as usize;

/// Writes records to the `transaction_record` table, one transaction per chunk.
pub struct PostgresSink {
    pool: PgPool
}

impl PostgresSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, SinkError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }
}

impl TransactionSink for PostgresSink {
    async fn write_chunk(&self, records: &[TransactionRecord]) -> Result<(), SinkError> {
        if records.is_empty() {
            return Ok(())
        }

        if records.len() * COLUMNS_PER_RECORD > MAX_BIND_PARAMETERS {
            return Err(SinkError::Rejected(format!(
                "chunk of {} records exceeds the limit of {} bind parameters",
                records.len(),
                MAX_BIND_PARAMETERS
            )))
        }

        let mut tx = self.pool.begin().await?;

        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(INSERT_TRANSACTION_RECORDS);

        query_builder.push_values(records, |mut builder, record| {
            builder.push_bind(record.account_number.as_str())
                .push_bind(record.trx_amount)
                .push_bind(record.description.as_deref())
                .push_bind(record.trx_date)
                .push_bind(record.trx_time)
                .push_bind(record.customer_id.as_str())
                .push_bind(record.version);
        });

        query_builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        debug!("Committed {} transaction records", records.len());

        Ok(())
    }
}
