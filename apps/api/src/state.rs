use std::sync::Arc;

use vigia_application::{AuditService, PositionService, PrincipalDirectory};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub audit_service: AuditService,
    pub position_service: PositionService,
    pub principal_directory: Arc<dyn PrincipalDirectory>,
}
