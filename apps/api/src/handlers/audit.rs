use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use vigia_application::{AuditFilter, ExportFormat};

use crate::dto::{AuditDetailResponse, AuditRecordResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Transport-level audit trail filter. Blank values mean "no filter";
/// dates are calendar days, inclusive on both ends.
#[derive(Debug, serde::Deserialize)]
pub struct AuditLogQuery {
    pub actor_id: Option<i64>,
    pub action: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl AuditLogQuery {
    fn into_filter(self) -> ApiResult<AuditFilter> {
        Ok(AuditFilter::from_transport(
            self.actor_id,
            self.action,
            self.date_from.as_deref(),
            self.date_to.as_deref(),
        )?)
    }
}

pub async fn list_audit_log_handler(
    State(state): State<AppState>,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Json<Vec<AuditRecordResponse>>> {
    let records = state
        .audit_service
        .query(query.into_filter()?)
        .await?
        .into_iter()
        .map(AuditRecordResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn audit_log_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AuditDetailResponse>> {
    let detail = state.audit_service.detail(id).await?;

    Ok(Json(AuditDetailResponse::from(detail)))
}

pub async fn export_audit_log_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Response> {
    let format = ExportFormat::from_transport(&format)?;
    let file = state
        .audit_service
        .export(query.into_filter()?, format)
        .await?;

    let headers = [
        (CONTENT_TYPE, file.content_type.to_owned()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ),
    ];

    Ok((headers, file.bytes).into_response())
}
