use async_trait::async_trait;

use vigia_core::AppResult;
use vigia_domain::Position;

/// Port for position persistence.
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// Lists every position.
    async fn list_positions(&self) -> AppResult<Vec<Position>>;

    /// Fetches one position by identity.
    async fn find_position(&self, id: i64) -> AppResult<Option<Position>>;

    /// Inserts a position and returns it with its assigned identity.
    async fn insert_position(&self, name: &str, description: Option<&str>) -> AppResult<Position>;

    /// Updates a position's fields and returns the stored row.
    async fn update_position(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Position>;

    /// Deletes a position.
    async fn delete_position(&self, id: i64) -> AppResult<()>;
}
