use super::{LoggedSink, MemorySink, PostgresSink, SinkError, TransactionSink};

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;

use crate::models::{Origin, TransactionRecord};

fn create_record(account_number: &str, line: u64) -> Result<TransactionRecord> {
    Ok(TransactionRecord {
        origin: Origin::new("input.txt", line),
        account_number: account_number.to_string(),
        trx_amount: Decimal::from_str("10.00")?,
        description: None,
        trx_date: NaiveDate::from_ymd_opt(2023, 8, 24).ok_or_else(|| anyhow!("date"))?,
        trx_time: NaiveTime::from_hms_opt(8, 0, 0).ok_or_else(|| anyhow!("time"))?,
        customer_id: "1".to_string(),
        version: 0
    })
}

#[tokio::test]
async fn test_memory_sink_keeps_insertion_order_and_batch_sizes() -> Result<()> {
    let sink = MemorySink::new();

    sink.write_chunk(&[create_record("a", 2)?, create_record("b", 3)?]).await?;
    sink.write_chunk(&[create_record("c", 4)?]).await?;

    let accounts: Vec<_> = sink.rows().into_iter().map(|record| record.account_number).collect();

    assert_eq!(accounts, vec!["a", "b", "c"]);
    assert_eq!(sink.batch_sizes(), vec![2, 1]);
    assert_eq!(sink.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_logged_sink_delegates_to_inner_sink() -> Result<()> {
    let inner = Arc::new(MemorySink::new());
    let sink = LoggedSink::new(inner.clone());

    sink.write_chunk(&[create_record("a", 2)?]).await?;

    assert_eq!(inner.len(), 1);
    assert_eq!(sink.inner().batch_sizes(), vec![1]);

    Ok(())
}

#[tokio::test]
async fn test_postgres_sink_rejects_chunks_over_the_bind_limit_before_connecting() -> Result<()> {
    let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/unused")?;
    let sink = PostgresSink::new(pool);

    let record = create_record("a", 2)?;
    let oversized = vec![record; 10_000];

    let result = sink.write_chunk(&oversized).await;

    assert!(matches!(result, Err(SinkError::Rejected(_))));

    Ok(())
}

#[tokio::test]
async fn test_postgres_sink_ignores_empty_chunks() -> Result<()> {
    let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/unused")?;
    let sink = PostgresSink::new(pool);

    sink.write_chunk(&[]).await?;

    Ok(())
}
