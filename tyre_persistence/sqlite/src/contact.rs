use anyhow::{ensure, Context};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use tyre_models::contact::{
    ContactMessage, ContactMessageAuthor, ContactMessageContent, ContactMessageEmail,
    ContactMessageId, ContactMessageMobile, ContactMessageName, NewContactMessage,
};
use tyre_persistence_contracts::contact::{ContactRepository, InsertedRow};
use tyre_utils::trace_instrument;

use crate::SqliteTransaction;

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteContactRepository;

const COLS: &str = "id, name, mobile, email, message, created_at";

impl ContactRepository<SqliteTransaction> for SqliteContactRepository {
    #[trace_instrument(skip(self, txn))]
    async fn create(
        &self,
        txn: &mut SqliteTransaction,
        message: &NewContactMessage,
    ) -> anyhow::Result<InsertedRow> {
        let result = sqlx::query(
            "insert into contact_messages (name, mobile, email, message, created_at) values (?1, \
             ?2, ?3, ?4, ?5)",
        )
        .bind(message.author.name.as_str())
        .bind(message.author.mobile.as_str())
        .bind(message.author.email.as_str())
        .bind(message.content.as_str())
        .bind(encode_timestamp(message.created_at))
        .execute(txn.conn())
        .await
        .context("Failed to insert contact message")?;

        Ok(InsertedRow {
            id: result.last_insert_rowid().into(),
            rows_affected: result.rows_affected(),
        })
    }

    #[trace_instrument(skip(self, txn))]
    async fn get(
        &self,
        txn: &mut SqliteTransaction,
        id: ContactMessageId,
    ) -> anyhow::Result<Option<ContactMessage>> {
        sqlx::query(&format!("select {COLS} from contact_messages where id = ?1"))
            .bind(*id)
            .fetch_optional(txn.conn())
            .await?
            .as_ref()
            .map(decode_contact_message)
            .transpose()
    }

    #[trace_instrument(skip(self, txn))]
    async fn list(&self, txn: &mut SqliteTransaction) -> anyhow::Result<Vec<ContactMessage>> {
        sqlx::query(&format!("select {COLS} from contact_messages order by id"))
            .fetch_all(txn.conn())
            .await?
            .iter()
            .map(decode_contact_message)
            .collect()
    }

    #[trace_instrument(skip(self, txn))]
    async fn count(&self, txn: &mut SqliteTransaction) -> anyhow::Result<u64> {
        let count = sqlx::query_scalar::<_, i64>("select count(*) from contact_messages")
            .fetch_one(txn.conn())
            .await?;
        ensure!(count >= 0, "Negative row count {count}");
        Ok(count as u64)
    }
}

/// ISO 8601 in UTC with millisecond precision, e.g. `2024-06-01T12:30:00.000Z`.
fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn decode_timestamp(timestamp: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|x| x.with_timezone(&Utc))
        .with_context(|| format!("Failed to decode timestamp {timestamp:?}"))
}

fn decode_contact_message(row: &SqliteRow) -> anyhow::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.try_get::<i64, _>("id")?.into(),
        author: ContactMessageAuthor {
            name: ContactMessageName::try_new(row.try_get::<String, _>("name")?)?,
            mobile: ContactMessageMobile::try_new(row.try_get::<String, _>("mobile")?)?,
            email: ContactMessageEmail::try_new(row.try_get::<String, _>("email")?)?,
        },
        content: ContactMessageContent::try_new(row.try_get::<String, _>("message")?)?,
        created_at: decode_timestamp(row.try_get("created_at")?)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamp_format() {
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let encoded = encode_timestamp(timestamp);
        assert_eq!(encoded, "2024-06-01T12:30:00.000Z");
        assert_eq!(decode_timestamp(&encoded).unwrap(), timestamp);
    }

    #[test]
    fn decode_timestamp_with_offset() {
        let decoded = decode_timestamp("2024-06-01T15:30:00.000+03:00").unwrap();
        assert_eq!(decoded, Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap());
        assert!(decode_timestamp("yesterday").is_err());
    }
}
