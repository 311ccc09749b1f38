use serde::Serialize;
use ts_rs::TS;
use vigia_application::AuditDetail;
use vigia_domain::AuditRecord;

/// One row of the browsable audit trail.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-record-response.ts"
)]
pub struct AuditRecordResponse {
    pub id: i64,
    pub actor_id: Option<i64>,
    pub actor_name: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub recorded_at: String,
}

impl From<AuditRecord> for AuditRecordResponse {
    fn from(value: AuditRecord) -> Self {
        Self {
            id: value.id,
            actor_id: value.actor_id,
            actor_name: value.actor_name,
            action: value.action,
            entity_type: value.entity_type,
            entity_id: value.entity_id,
            recorded_at: value.recorded_at.to_rfc3339(),
        }
    }
}

/// Expanded view of a single audit record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-detail-response.ts"
)]
pub struct AuditDetailResponse {
    pub id: i64,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub previous_data: Option<String>,
    pub new_data: Option<String>,
    pub recorded_at: String,
}

impl From<AuditDetail> for AuditDetailResponse {
    fn from(value: AuditDetail) -> Self {
        Self {
            id: value.id,
            actor: value.actor,
            action: value.action,
            entity_type: value.entity_type,
            entity_id: value.entity_id,
            previous_data: value.previous_data,
            new_data: value.new_data,
            recorded_at: value.recorded_at.to_rfc3339(),
        }
    }
}
