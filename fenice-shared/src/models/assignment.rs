/// Assignment model and database operations
///
/// An assignment records that one family has signed up for one resource.
/// The `(resource_id, family_id)` pair is unique.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE assignments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     resource_id UUID NOT NULL REFERENCES resources(id) ON DELETE CASCADE,
///     family_id UUID NOT NULL REFERENCES families(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT assignments_resource_family_key UNIQUE (resource_id, family_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Assignment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub family_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Assignment joined with the family's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AssignmentWithFamily {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub family_id: Uuid,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// Inserts an assignment unless the family already holds one
    ///
    /// Returns `None` when the unique pair already exists.
    pub async fn insert_if_absent<'e, E: PgExecutor<'e>>(
        executor: E,
        resource_id: Uuid,
        family_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (resource_id, family_id)
            VALUES ($1, $2)
            ON CONFLICT (resource_id, family_id) DO NOTHING
            RETURNING id, resource_id, family_id, created_at
            "#,
        )
        .bind(resource_id)
        .bind(family_id)
        .fetch_optional(executor)
        .await
    }

    /// Family IDs currently assigned to a resource
    pub async fn family_ids_for_resource<'e, E: PgExecutor<'e>>(
        executor: E,
        resource_id: Uuid,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT family_id FROM assignments WHERE resource_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(resource_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Assignments of one resource, in sign-up order
    pub async fn list_for_resource<'e, E: PgExecutor<'e>>(
        executor: E,
        resource_id: Uuid,
    ) -> Result<Vec<AssignmentWithFamily>, sqlx::Error> {
        sqlx::query_as::<_, AssignmentWithFamily>(
            r#"
            SELECT a.id, a.resource_id, a.family_id, f.display_name, a.created_at
            FROM assignments a
            JOIN families f ON f.id = a.family_id
            WHERE a.resource_id = $1
            ORDER BY a.created_at ASC, a.id ASC
            "#,
        )
        .bind(resource_id)
        .fetch_all(executor)
        .await
    }

    /// Assignments of several resources at once, in sign-up order
    pub async fn list_for_resources<'e, E: PgExecutor<'e>>(
        executor: E,
        resource_ids: &[Uuid],
    ) -> Result<Vec<AssignmentWithFamily>, sqlx::Error> {
        if resource_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, AssignmentWithFamily>(
            r#"
            SELECT a.id, a.resource_id, a.family_id, f.display_name, a.created_at
            FROM assignments a
            JOIN families f ON f.id = a.family_id
            WHERE a.resource_id = ANY($1)
            ORDER BY a.created_at ASC, a.id ASC
            "#,
        )
        .bind(resource_ids)
        .fetch_all(executor)
        .await
    }
}
