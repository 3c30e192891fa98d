/// Family model and database operations
///
/// A family is the acting identity of the dashboard. Families are seeded out
/// of band and never mutated or deleted by the application.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE families (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(100) NOT NULL,       -- stored lower-case, unique
///     display_name VARCHAR(255) NOT NULL,
///     is_admin BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Family record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Family {
    /// Unique family ID
    pub id: Uuid,

    /// Lower-case login handle
    pub username: String,

    /// Name shown on badges and charts
    pub display_name: String,

    /// Admin capability flag
    pub is_admin: bool,

    /// When the family was seeded
    pub created_at: DateTime<Utc>,
}

/// Input for seeding a family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFamily {
    /// Login handle (lower-cased on insert)
    pub username: String,

    /// Display name
    pub display_name: String,

    /// Admin capability flag
    #[serde(default)]
    pub is_admin: bool,
}

impl Family {
    /// Seeds a family
    ///
    /// The application never calls this on a request path; it exists for
    /// out-of-band seeding and tests.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        data: CreateFamily,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Family>(
            r#"
            INSERT INTO families (username, display_name, is_admin)
            VALUES (lower($1), $2, $3)
            RETURNING id, username, display_name, is_admin, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.display_name)
        .bind(data.is_admin)
        .fetch_one(executor)
        .await
    }

    /// Finds a family by its login handle
    ///
    /// `username` must already be normalized to lower case.
    pub async fn find_by_username<'e, E: PgExecutor<'e>>(
        executor: E,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Family>(
            r#"
            SELECT id, username, display_name, is_admin, created_at
            FROM families
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(executor)
        .await
    }

    /// Finds a family by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Family>(
            r#"
            SELECT id, username, display_name, is_admin, created_at
            FROM families
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }
}
