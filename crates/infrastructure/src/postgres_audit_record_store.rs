use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use vigia_application::{AuditFilter, AuditRecordStore, NewAuditRecord};
use vigia_core::{AppError, AppResult};
use vigia_domain::AuditRecord;


/// PostgreSQL-backed append-only audit record store.
#[derive(Clone)]
pub struct PostgresAuditRecordStore {
    pool: PgPool,
}

impl PostgresAuditRecordStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// The filter contract is a literal substring match, so LIKE
// metacharacters in the caller value must not act as wildcards.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

#[derive(Debug, FromRow)]
struct AuditRecordRow {
    id: i64,
    actor_id: Option<i64>,
    actor_name: Option<String>,
    action: String,
    entity_type: String,
    entity_id: i64,
    before_state: Option<String>,
    after_state: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl From<AuditRecordRow> for AuditRecord {
    fn from(row: AuditRecordRow) -> Self {
        Self {
            id: row.id,
            actor_id: row.actor_id,
            actor_name: row.actor_name,
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            before_state: row.before_state,
            after_state: row.after_state,
            recorded_at: row.recorded_at,
        }
    }
}

#[async_trait]
impl AuditRecordStore for PostgresAuditRecordStore {
    async fn append(&self, record: NewAuditRecord) -> AppResult<AuditRecord> {
        // Scoped transaction: commit on success, rollback on drop.
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|error| AppError::Write(format!("failed to open transaction: {error}")))?;

        let row = sqlx::query_as::<_, AuditRecordRow>(
            r#"
            INSERT INTO audit_records (
                actor_id,
                actor_name,
                action,
                entity_type,
                entity_id,
                before_state,
                after_state,
                recorded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id,
                actor_id,
                actor_name,
                action,
                entity_type,
                entity_id,
                before_state,
                after_state,
                recorded_at
            "#,
        )
        .bind(record.actor_id)
        .bind(record.actor_name)
        .bind(record.action)
        .bind(record.entity_type)
        .bind(record.entity_id)
        .bind(record.before_state)
        .bind(record.after_state)
        .bind(record.recorded_at)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| AppError::Write(format!("failed to append audit record: {error}")))?;

        transaction
            .commit()
            .await
            .map_err(|error| AppError::Write(format!("failed to commit audit record: {error}")))?;

        Ok(row.into())
    }

    async fn query(&self, filter: AuditFilter) -> AppResult<Vec<AuditRecord>> {
        let rows = sqlx::query_as::<_, AuditRecordRow>(
            r#"
            SELECT
                id,
                actor_id,
                actor_name,
                action,
                entity_type,
                entity_id,
                before_state,
                after_state,
                recorded_at
            FROM audit_records
            WHERE ($1::BIGINT IS NULL OR actor_id = $1)
                AND ($2::TEXT IS NULL OR action ILIKE '%' || $2 || '%' ESCAPE '\')
                AND ($3::TIMESTAMPTZ IS NULL OR recorded_at >= $3)
                AND ($4::TIMESTAMPTZ IS NULL OR recorded_at <= $4)
            ORDER BY recorded_at DESC, id DESC
            "#,
        )
        .bind(filter.actor_id)
        .bind(filter.action.as_deref().map(escape_like))
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to query audit records: {error}")))?;

        Ok(rows.into_iter().map(AuditRecord::from).collect())
    }

    async fn find(&self, id: i64) -> AppResult<Option<AuditRecord>> {
        let row = sqlx::query_as::<_, AuditRecordRow>(
            r#"
            SELECT
                id,
                actor_id,
                actor_name,
                action,
                entity_type,
                entity_id,
                before_state,
                after_state,
                recorded_at
            FROM audit_records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load audit record: {error}")))?;

        Ok(row.map(AuditRecord::from))
    }
}
