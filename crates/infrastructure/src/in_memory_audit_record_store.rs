use async_trait::async_trait;
use tokio::sync::RwLock;

use vigia_application::{AuditFilter, AuditRecordStore, NewAuditRecord};
use vigia_core::AppResult;
use vigia_domain::AuditRecord;

#[cfg(test)]
mod tests;

/// In-memory audit record store.
///
/// Mirrors the Postgres adapter's filter and ordering semantics so the
/// audit core can be exercised without a database.
#[derive(Debug, Default)]
pub struct InMemoryAuditRecordStore {
    records: RwLock<Vec<AuditRecord>>,
}

impl InMemoryAuditRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

fn matches_filter(record: &AuditRecord, filter: &AuditFilter) -> bool {
    if let Some(actor_id) = filter.actor_id {
        if record.actor_id != Some(actor_id) {
            return false;
        }
    }

    if let Some(action) = &filter.action {
        if !record
            .action
            .to_lowercase()
            .contains(action.to_lowercase().as_str())
        {
            return false;
        }
    }

    if let Some(from) = filter.from {
        if record.recorded_at < from {
            return false;
        }
    }

    if let Some(to) = filter.to {
        if record.recorded_at > to {
            return false;
        }
    }

    true
}

#[async_trait]
impl AuditRecordStore for InMemoryAuditRecordStore {
    async fn append(&self, record: NewAuditRecord) -> AppResult<AuditRecord> {
        let mut records = self.records.write().await;

        // Rows are never removed, so length is a monotonic id source.
        let stored = AuditRecord {
            id: records.len() as i64 + 1,
            actor_id: record.actor_id,
            actor_name: record.actor_name,
            action: record.action,
            entity_type: record.entity_type,
            entity_id: record.entity_id,
            before_state: record.before_state,
            after_state: record.after_state,
            recorded_at: record.recorded_at,
        };

        records.push(stored.clone());
        Ok(stored)
    }

    async fn query(&self, filter: AuditFilter) -> AppResult<Vec<AuditRecord>> {
        let records = self.records.read().await;

        let mut matched: Vec<AuditRecord> = records
            .iter()
            .filter(|record| matches_filter(record, &filter))
            .cloned()
            .collect();

        matched.sort_by(|left, right| {
            right
                .recorded_at
                .cmp(&left.recorded_at)
                .then(right.id.cmp(&left.id))
        });

        Ok(matched)
    }

    async fn find(&self, id: i64) -> AppResult<Option<AuditRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }
}
