use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;

use vigia_core::{AppError, AppResult, UserIdentity};
use vigia_domain::{AuditRecord, Position, Principal};

use crate::audit_ports::{
    AuditFilter, AuditRecordStore, Clock, NewAuditRecord, PrincipalDirectory,
};
use crate::audit_service::AuditService;
use crate::position_ports::PositionRepository;

use super::{PositionInput, PositionService};

#[derive(Default)]
struct FakePositionRepository {
    positions: Mutex<Vec<Position>>,
}

#[async_trait]
impl PositionRepository for FakePositionRepository {
    async fn list_positions(&self) -> AppResult<Vec<Position>> {
        Ok(self.positions.lock().await.clone())
    }

    async fn find_position(&self, id: i64) -> AppResult<Option<Position>> {
        let positions = self.positions.lock().await;
        Ok(positions.iter().find(|position| position.id == id).cloned())
    }

    async fn insert_position(&self, name: &str, description: Option<&str>) -> AppResult<Position> {
        let mut positions = self.positions.lock().await;
        let position = Position {
            id: positions.len() as i64 + 1,
            name: name.to_owned(),
            description: description.map(str::to_owned),
        };
        positions.push(position.clone());
        Ok(position)
    }

    async fn update_position(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Position> {
        let mut positions = self.positions.lock().await;
        let Some(position) = positions.iter_mut().find(|position| position.id == id) else {
            return Err(AppError::NotFound(format!("position {id}")));
        };
        position.name = name.to_owned();
        position.description = description.map(str::to_owned);
        Ok(position.clone())
    }

    async fn delete_position(&self, id: i64) -> AppResult<()> {
        let mut positions = self.positions.lock().await;
        positions.retain(|position| position.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingAuditStore {
    records: Mutex<Vec<AuditRecord>>,
}

#[async_trait]
impl AuditRecordStore for RecordingAuditStore {
    async fn append(&self, record: NewAuditRecord) -> AppResult<AuditRecord> {
        let mut records = self.records.lock().await;
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

    async fn query(&self, _filter: AuditFilter) -> AppResult<Vec<AuditRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn find(&self, _id: i64) -> AppResult<Option<AuditRecord>> {
        Ok(None)
    }
}

struct FailingAuditStore;

#[async_trait]
impl AuditRecordStore for FailingAuditStore {
    async fn append(&self, _record: NewAuditRecord) -> AppResult<AuditRecord> {
        Err(AppError::Write("audit table unavailable".to_owned()))
    }

    async fn query(&self, _filter: AuditFilter) -> AppResult<Vec<AuditRecord>> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: i64) -> AppResult<Option<AuditRecord>> {
        Ok(None)
    }
}

struct EmptyDirectory;

#[async_trait]
impl PrincipalDirectory for EmptyDirectory {
    async fn find_principal(&self, _id: i64) -> AppResult<Option<Principal>> {
        Ok(None)
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn service() -> (PositionService, Arc<RecordingAuditStore>) {
    let store = Arc::new(RecordingAuditStore::default());
    let audit_service =
        AuditService::new(store.clone(), Arc::new(EmptyDirectory), Arc::new(FixedClock(now())));
    let service = PositionService::new(Arc::new(FakePositionRepository::default()), audit_service);
    (service, store)
}

fn alice() -> UserIdentity {
    UserIdentity::new(1, "alice", "Alice Prado")
}

#[tokio::test]
async fn create_records_insert_with_after_snapshot_only() {
    let (service, store) = service();

    let created = service
        .create(
            &alice(),
            PositionInput {
                name: "Clerk".to_owned(),
                description: None,
            },
        )
        .await;
    assert!(created.is_ok());

    let records = store.records.lock().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, "INSERT");
    assert_eq!(records[0].entity_type, "POSITION");
    assert_eq!(records[0].before_state, None);
    assert!(
        records[0]
            .after_state
            .as_deref()
            .unwrap_or_default()
            .contains("Clerk")
    );
}

#[tokio::test]
async fn update_records_both_snapshots() {
    let (service, store) = service();

    let created = service
        .create(
            &alice(),
            PositionInput {
                name: "Clerk".to_owned(),
                description: None,
            },
        )
        .await;
    assert!(created.is_ok());

    let updated = service
        .update(
            &alice(),
            1,
            PositionInput {
                name: "Senior Clerk".to_owned(),
                description: Some("handles records".to_owned()),
            },
        )
        .await;
    assert!(updated.is_ok());

    let records = store.records.lock().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].action, "UPDATE");
    assert!(
        records[1]
            .before_state
            .as_deref()
            .unwrap_or_default()
            .contains("Clerk")
    );
    assert!(
        records[1]
            .after_state
            .as_deref()
            .unwrap_or_default()
            .contains("Senior Clerk")
    );
}

#[tokio::test]
async fn delete_records_before_snapshot_only() {
    let (service, store) = service();

    let created = service
        .create(
            &alice(),
            PositionInput {
                name: "Clerk".to_owned(),
                description: None,
            },
        )
        .await;
    assert!(created.is_ok());

    let deleted = service.delete(&alice(), 1).await;
    assert!(deleted.is_ok());

    let records = store.records.lock().await;
    assert_eq!(records[1].action, "DELETE");
    assert!(records[1].before_state.is_some());
    assert_eq!(records[1].after_state, None);
}

#[tokio::test]
async fn audit_write_failure_propagates_to_the_caller() {
    let audit_service = AuditService::new(
        Arc::new(FailingAuditStore),
        Arc::new(EmptyDirectory),
        Arc::new(FixedClock(now())),
    );
    let service = PositionService::new(Arc::new(FakePositionRepository::default()), audit_service);

    let result = service
        .create(
            &alice(),
            PositionInput {
                name: "Clerk".to_owned(),
                description: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Write(_))));
}

#[tokio::test]
async fn blank_name_is_rejected_before_any_write() {
    let (service, store) = service();

    let result = service
        .create(
            &alice(),
            PositionInput {
                name: "   ".to_owned(),
                description: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(store.records.lock().await.is_empty());
}

#[tokio::test]
async fn update_of_missing_position_is_not_found() {
    let (service, _) = service();

    let result = service
        .update(
            &alice(),
            42,
            PositionInput {
                name: "Clerk".to_owned(),
                description: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
