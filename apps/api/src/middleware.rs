use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use vigia_core::{AppError, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the caller identity, set by the trusted frontend proxy.
const USER_ID_HEADER: &str = "x-user-id";

pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let principal = state
        .principal_directory
        .find_principal(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("unknown principal".to_owned()))?;

    if !principal.is_active {
        return Err(AppError::Forbidden("principal is deactivated".to_owned()).into());
    }

    let identity = UserIdentity::new(principal.id, principal.login, principal.display_name);
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
