mod audit;
mod common;
mod positions;

pub use audit::{AuditDetailResponse, AuditRecordResponse};
pub use common::HealthResponse;
pub use positions::{CreatePositionRequest, PositionResponse, UpdatePositionRequest};

#[cfg(test)]
mod tests {
    use super::{
        AuditDetailResponse, AuditRecordResponse, CreatePositionRequest, HealthResponse,
        PositionResponse, UpdatePositionRequest,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        CreatePositionRequest::export(&config)?;
        UpdatePositionRequest::export(&config)?;
        PositionResponse::export(&config)?;
        AuditRecordResponse::export(&config)?;
        AuditDetailResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;

        Ok(())
    }
}
