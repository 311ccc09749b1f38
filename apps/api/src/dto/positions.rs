use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vigia_domain::Position;

/// API representation of a position.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/position-response.ts"
)]
pub struct PositionResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Position> for PositionResponse {
    fn from(value: Position) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

/// Request payload for creating a position.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-position-request.ts"
)]
pub struct CreatePositionRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Request payload for updating a position.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-position-request.ts"
)]
pub struct UpdatePositionRequest {
    pub name: String,
    pub description: Option<String>,
}
