use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use vigia_application::PrincipalDirectory;
use vigia_core::{AppError, AppResult};
use vigia_domain::Principal;

/// PostgreSQL-backed principal directory.
#[derive(Clone)]
pub struct PostgresPrincipalDirectory {
    pool: PgPool,
}

impl PostgresPrincipalDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: i64,
    login: String,
    display_name: String,
    is_active: bool,
}

#[async_trait]
impl PrincipalDirectory for PostgresPrincipalDirectory {
    async fn find_principal(&self, id: i64) -> AppResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, login, display_name, is_active
            FROM principals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load principal: {error}")))?;

        Ok(row.map(|row| Principal {
            id: row.id,
            login: row.login,
            display_name: row.display_name,
            is_active: row.is_active,
        }))
    }
}
