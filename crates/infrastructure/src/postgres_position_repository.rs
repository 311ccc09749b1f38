use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use vigia_application::PositionRepository;
use vigia_core::{AppError, AppResult};
use vigia_domain::Position;

/// PostgreSQL-backed position repository.
#[derive(Clone)]
pub struct PostgresPositionRepository {
    pool: PgPool,
}

impl PostgresPositionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PositionRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[async_trait]
impl PositionRepository for PostgresPositionRepository {
    async fn list_positions(&self) -> AppResult<Vec<Position>> {
        let rows = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, name, description
            FROM positions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list positions: {error}")))?;

        Ok(rows.into_iter().map(Position::from).collect())
    }

    async fn find_position(&self, id: i64) -> AppResult<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, name, description
            FROM positions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load position: {error}")))?;

        Ok(row.map(Position::from))
    }

    async fn insert_position(&self, name: &str, description: Option<&str>) -> AppResult<Position> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            INSERT INTO positions (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert position: {error}")))?;

        Ok(row.into())
    }

    async fn update_position(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Position> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            UPDATE positions
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update position: {error}")))?;

        row.map(Position::from)
            .ok_or_else(|| AppError::NotFound(format!("position {id}")))
    }

    async fn delete_position(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM positions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete position: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("position {id}")));
        }

        Ok(())
    }
}
