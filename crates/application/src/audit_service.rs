use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use vigia_core::{AppError, AppResult, UserIdentity};
use vigia_domain::{AuditAction, AuditRecord, Snapshot};

use crate::audit_ports::{AuditFilter, AuditRecordStore, Clock, NewAuditRecord, PrincipalDirectory};

/// Export format selection and rendering.
pub mod export;

use export::{ExportFile, ExportFormat, ExportRow};


/// Display value substituted when an actor cannot be resolved.
///
/// Principal deletion never cascades into audit history, so a missing
/// directory entry degrades the one row instead of failing the call.
pub const UNKNOWN_ACTOR: &str = "unknown actor";

/// Display value for records written without an acting principal.
///
/// Only self-registration writes without an actor; a distinct label
/// keeps it distinguishable from a deleted principal.
pub const SELF_REGISTERED_ACTOR: &str = "self-registration";

/// Expanded view of one audit record for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDetail {
    /// Record identity.
    pub id: i64,
    /// Resolved actor display name.
    pub actor: String,
    /// Action vocabulary value as stored.
    pub action: String,
    /// Logical entity affected.
    pub entity_type: String,
    /// Identity of the affected row.
    pub entity_id: i64,
    /// Before-state rendered for display; raw stored text when the blob
    /// does not decode.
    pub previous_data: Option<String>,
    /// After-state rendered for display, with the same fallback.
    pub new_data: Option<String>,
    /// Creation instant.
    pub recorded_at: DateTime<Utc>,
}

/// The audit core: append-only writer, filtered query engine, detail
/// formatter, and multi-format exporter.
#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn AuditRecordStore>,
    directory: Arc<dyn PrincipalDirectory>,
    clock: Arc<dyn Clock>,
}

impl AuditService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        store: Arc<dyn AuditRecordStore>,
        directory: Arc<dyn PrincipalDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            directory,
            clock,
        }
    }

    /// Persists one audit record for a state-changing operation.
    ///
    /// Snapshots are encoded only when present; an absent snapshot stores
    /// as absent, never as encoded-empty text. The timestamp is taken
    /// from the clock at persistence time. Persistence failures surface
    /// to the caller so a lost record is never silent.
    pub async fn record(
        &self,
        actor: Option<&UserIdentity>,
        action: AuditAction,
        entity_type: &str,
        entity_id: i64,
        before: Option<&Snapshot>,
        after: Option<&Snapshot>,
    ) -> AppResult<AuditRecord> {
        let before_state = before.map(Snapshot::encode).transpose()?;
        let after_state = after.map(Snapshot::encode).transpose()?;

        self.store
            .append(NewAuditRecord {
                actor_id: actor.map(UserIdentity::user_id),
                actor_name: actor.map(|identity| identity.display_name().to_owned()),
                action: action.as_str().to_owned(),
                entity_type: entity_type.to_owned(),
                entity_id,
                before_state,
                after_state,
                recorded_at: self.clock.now(),
            })
            .await
    }

    /// Returns the filtered audit trail, most recent first.
    pub async fn query(&self, filter: AuditFilter) -> AppResult<Vec<AuditRecord>> {
        self.store.query(filter).await
    }

    /// Expands one record for inspection.
    ///
    /// Corrupt snapshot blobs degrade to their raw stored text; the
    /// stored record itself is never touched.
    pub async fn detail(&self, id: i64) -> AppResult<AuditDetail> {
        let record = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("audit record {id}")))?;

        let actor = self.resolve_actor(&record).await;

        Ok(AuditDetail {
            id: record.id,
            actor,
            action: record.action.clone(),
            entity_type: record.entity_type.clone(),
            entity_id: record.entity_id,
            previous_data: record.before_view().map(|view| view.display_text()),
            new_data: record.after_view().map(|view| view.display_text()),
            recorded_at: record.recorded_at,
        })
    }

    /// Renders the filtered audit trail into the requested format.
    ///
    /// The exporter applies no filtering of its own; it renders exactly
    /// the set the query engine produced.
    pub async fn export(&self, filter: AuditFilter, format: ExportFormat) -> AppResult<ExportFile> {
        let records = self.store.query(filter).await?;

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            rows.push(ExportRow {
                id: record.id,
                actor: self.resolve_actor(record).await,
                action: record.action.clone(),
                entity_type: record.entity_type.clone(),
                entity_id: record.entity_id,
                previous_data: record.before_view().map(|view| view.display_text()),
                new_data: record.after_view().map(|view| view.display_text()),
                recorded_at: record.recorded_at.format("%d/%m/%Y %H:%M:%S").to_string(),
            });
        }

        match format {
            ExportFormat::Csv => export::tabular::render(&rows),
            ExportFormat::Spreadsheet => export::spreadsheet::render(&rows),
            ExportFormat::Document => export::document::render(&rows),
        }
    }

    /// Resolves the actor display for one record.
    ///
    /// The name captured at write time wins; otherwise the directory is
    /// consulted, and any miss or lookup failure degrades to the
    /// [`UNKNOWN_ACTOR`] placeholder for that row only. Records written
    /// with no actor at all render as [`SELF_REGISTERED_ACTOR`].
    async fn resolve_actor(&self, record: &AuditRecord) -> String {
        if let Some(name) = &record.actor_name {
            return name.clone();
        }

        let Some(actor_id) = record.actor_id else {
            return SELF_REGISTERED_ACTOR.to_owned();
        };

        match self.directory.find_principal(actor_id).await {
            Ok(Some(principal)) => principal.display_name,
            Ok(None) => {
                warn!(record_id = record.id, actor_id, "audit actor no longer in directory");
                UNKNOWN_ACTOR.to_owned()
            }
            Err(error) => {
                warn!(record_id = record.id, actor_id, %error, "actor lookup failed");
                UNKNOWN_ACTOR.to_owned()
            }
        }
    }
}
