/// Time contribution model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE time_contributions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     family_id UUID NOT NULL REFERENCES families(id),
///     hours DOUBLE PRECISION NOT NULL CHECK (hours >= 0),
///     activity TEXT NOT NULL,
///     date DATE NOT NULL DEFAULT CURRENT_DATE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Time contribution record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimeContribution {
    pub id: Uuid,
    pub family_id: Uuid,
    pub hours: f64,
    pub activity: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Time contribution joined with the family's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContributionWithFamily {
    pub id: Uuid,
    pub family_id: Uuid,
    pub display_name: String,
    pub hours: f64,
    pub activity: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Validated input for recording a contribution
#[derive(Debug, Clone)]
pub struct NewContribution {
    pub family_id: Uuid,
    pub hours: f64,
    pub activity: String,
    /// Defaults to the current date when `None`
    pub date: Option<NaiveDate>,
}

impl TimeContribution {
    /// Inserts a contribution
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        data: NewContribution,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, TimeContribution>(
            r#"
            INSERT INTO time_contributions (family_id, hours, activity, date)
            VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE))
            RETURNING id, family_id, hours, activity, date, created_at
            "#,
        )
        .bind(data.family_id)
        .bind(data.hours)
        .bind(data.activity)
        .bind(data.date)
        .fetch_one(executor)
        .await
    }

    /// Lists every contribution, newest first
    pub async fn list_all<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Vec<ContributionWithFamily>, sqlx::Error> {
        sqlx::query_as::<_, ContributionWithFamily>(
            r#"
            SELECT c.id, c.family_id, f.display_name, c.hours, c.activity, c.date, c.created_at
            FROM time_contributions c
            JOIN families f ON f.id = c.family_id
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .fetch_all(executor)
        .await
    }

    /// Deletes a contribution
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_contributions WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
