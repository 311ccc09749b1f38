use std::sync::Arc;

use vigia_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use vigia_domain::{AuditAction, Position};

use crate::audit_service::AuditService;
use crate::position_ports::PositionRepository;

#[cfg(test)]
mod tests;

const POSITION_ENTITY: &str = "POSITION";

/// Input payload for creating or updating a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionInput {
    /// Position name; must be non-empty.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Application service for position CRUD.
///
/// Every mutation appends one audit record after the business change.
/// Audit persistence failure propagates to the caller rather than being
/// swallowed.
#[derive(Clone)]
pub struct PositionService {
    repository: Arc<dyn PositionRepository>,
    audit_service: AuditService,
}

impl PositionService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn PositionRepository>, audit_service: AuditService) -> Self {
        Self {
            repository,
            audit_service,
        }
    }

    /// Returns every position.
    pub async fn list(&self) -> AppResult<Vec<Position>> {
        self.repository.list_positions().await
    }

    /// Returns one position.
    pub async fn get(&self, id: i64) -> AppResult<Position> {
        self.repository
            .find_position(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("position {id}")))
    }

    /// Creates a position and records an INSERT audit entry.
    pub async fn create(&self, actor: &UserIdentity, input: PositionInput) -> AppResult<Position> {
        let name = NonEmptyString::new(input.name)?;
        let position = self
            .repository
            .insert_position(name.as_str(), input.description.as_deref())
            .await?;

        self.audit_service
            .record(
                Some(actor),
                AuditAction::Insert,
                POSITION_ENTITY,
                position.id,
                None,
                Some(&position.snapshot()),
            )
            .await?;

        Ok(position)
    }

    /// Updates a position and records an UPDATE audit entry with both
    /// snapshots.
    pub async fn update(
        &self,
        actor: &UserIdentity,
        id: i64,
        input: PositionInput,
    ) -> AppResult<Position> {
        let name = NonEmptyString::new(input.name)?;
        let before = self.get(id).await?;

        let updated = self
            .repository
            .update_position(id, name.as_str(), input.description.as_deref())
            .await?;

        self.audit_service
            .record(
                Some(actor),
                AuditAction::Update,
                POSITION_ENTITY,
                id,
                Some(&before.snapshot()),
                Some(&updated.snapshot()),
            )
            .await?;

        Ok(updated)
    }

    /// Deletes a position and records a DELETE audit entry with the
    /// before snapshot.
    pub async fn delete(&self, actor: &UserIdentity, id: i64) -> AppResult<()> {
        let before = self.get(id).await?;

        self.repository.delete_position(id).await?;

        self.audit_service
            .record(
                Some(actor),
                AuditAction::Delete,
                POSITION_ENTITY,
                id,
                Some(&before.snapshot()),
                None,
            )
            .await?;

        Ok(())
    }
}
