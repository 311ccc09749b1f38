use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use vigia_application::PositionInput;
use vigia_core::UserIdentity;

use crate::dto::{CreatePositionRequest, PositionResponse, UpdatePositionRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_positions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PositionResponse>>> {
    let positions = state
        .position_service
        .list()
        .await?
        .into_iter()
        .map(PositionResponse::from)
        .collect();

    Ok(Json(positions))
}

pub async fn get_position_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PositionResponse>> {
    let position = state.position_service.get(id).await?;

    Ok(Json(PositionResponse::from(position)))
}

pub async fn create_position_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(request): Json<CreatePositionRequest>,
) -> ApiResult<(StatusCode, Json<PositionResponse>)> {
    let position = state
        .position_service
        .create(
            &user,
            PositionInput {
                name: request.name,
                description: request.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PositionResponse::from(position))))
}

pub async fn update_position_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePositionRequest>,
) -> ApiResult<Json<PositionResponse>> {
    let position = state
        .position_service
        .update(
            &user,
            id,
            PositionInput {
                name: request.name,
                description: request.description,
            },
        )
        .await?;

    Ok(Json(PositionResponse::from(position)))
}

pub async fn delete_position_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.position_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
