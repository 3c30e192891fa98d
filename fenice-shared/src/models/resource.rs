/// Resource model and database operations
///
/// A resource is a schedulable unit with a maximum number of assignees.
/// Cleaning slots and tasks share one table and are told apart by `kind`.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE resource_kind AS ENUM ('cleaning_slot', 'task');
///
/// CREATE TABLE resources (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     kind resource_kind NOT NULL,
///     date DATE NOT NULL,
///     time TIME,
///     title VARCHAR(255) NOT NULL,          -- cleaning area or task title
///     description TEXT,
///     max_assignees INTEGER NOT NULL CHECK (max_assignees >= 1),
///     created_by UUID REFERENCES families(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Assignments reference resources with `ON DELETE CASCADE`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

use super::assignment::AssignmentWithFamily;

/// Kind of capacity-bounded resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Cleaning time slot: open creation, not deletable
    CleaningSlot,

    /// Shared task: admin-only creation and deletion
    Task,
}

impl ResourceKind {
    /// Database/enum name
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::CleaningSlot => "cleaning_slot",
            ResourceKind::Task => "task",
        }
    }

    /// Human-readable name for messages
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::CleaningSlot => "cleaning slot",
            ResourceKind::Task => "task",
        }
    }

    /// Capacity used when the creator does not supply one
    pub fn default_max_assignees(&self) -> i32 {
        match self {
            ResourceKind::CleaningSlot => 2,
            ResourceKind::Task => 1,
        }
    }

    /// Start time used when the creator does not supply one
    pub fn default_time(&self) -> Option<NaiveTime> {
        match self {
            ResourceKind::CleaningSlot => NaiveTime::from_hms_opt(9, 0, 0),
            ResourceKind::Task => None,
        }
    }

    /// Whether creating this kind requires the admin capability
    pub fn creation_requires_admin(&self) -> bool {
        matches!(self, ResourceKind::Task)
    }

    /// Whether this kind can be deleted at all
    pub fn is_deletable(&self) -> bool {
        matches!(self, ResourceKind::Task)
    }
}

/// Resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    /// Unique resource ID
    pub id: Uuid,

    /// Cleaning slot or task
    pub kind: ResourceKind,

    /// Calendar day
    pub date: NaiveDate,

    /// Optional start time
    pub time: Option<NaiveTime>,

    /// Cleaning area or task title
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Maximum number of assignees (>= 1)
    pub max_assignees: i32,

    /// Family that created the resource
    pub created_by: Option<Uuid>,

    /// When the resource was created
    pub created_at: DateTime<Utc>,
}

/// Validated input for inserting a resource
#[derive(Debug, Clone)]
pub struct NewResource {
    pub kind: ResourceKind,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub title: String,
    pub description: Option<String>,
    pub max_assignees: i32,
    pub created_by: Option<Uuid>,
}

/// A resource together with its current roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceWithAssignments {
    #[serde(flatten)]
    pub resource: Resource,

    /// Current assignments joined with family display names
    pub assignments: Vec<AssignmentWithFamily>,
}

impl ResourceWithAssignments {
    /// Number of current assignees
    pub fn occupied(&self) -> usize {
        self.assignments.len()
    }

    /// Whether `family_id` already holds an assignment
    pub fn is_assigned(&self, family_id: Uuid) -> bool {
        self.assignments.iter().any(|a| a.family_id == family_id)
    }
}

const RESOURCE_COLUMNS: &str =
    "id, kind, date, time, title, description, max_assignees, created_by, created_at";

impl Resource {
    /// Inserts a resource
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        data: NewResource,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO resources (kind, date, time, title, description, max_assignees, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {RESOURCE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Resource>(&query)
            .bind(data.kind)
            .bind(data.date)
            .bind(data.time)
            .bind(data.title)
            .bind(data.description)
            .bind(data.max_assignees)
            .bind(data.created_by)
            .fetch_one(executor)
            .await
    }

    /// Finds a resource of the given kind by ID
    pub async fn find<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1 AND kind = $2");

        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(kind)
            .fetch_optional(executor)
            .await
    }

    /// Finds a resource and locks its row until the transaction ends
    ///
    /// Concurrent sign-ups for the same resource queue behind this lock.
    pub async fn find_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1 AND kind = $2 FOR UPDATE"
        );

        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(kind)
            .fetch_optional(executor)
            .await
    }

    /// Lists one page of resources dated on or after `from`
    ///
    /// Ordered by date, then time (untimed first), then creation order.
    pub async fn list_upcoming<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: ResourceKind,
        from: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM resources
            WHERE kind = $1 AND date >= $2
            ORDER BY date ASC, time ASC NULLS FIRST, created_at ASC, id ASC
            LIMIT $3 OFFSET $4
            "#
        );

        sqlx::query_as::<_, Resource>(&query)
            .bind(kind)
            .bind(from)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// Counts resources dated on or after `from`
    pub async fn count_upcoming<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: ResourceKind,
        from: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM resources WHERE kind = $1 AND date >= $2")
                .bind(kind)
                .bind(from)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }

    /// Lists all resources in the inclusive window `[from, to]`
    pub async fn list_between<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: ResourceKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {RESOURCE_COLUMNS}
            FROM resources
            WHERE kind = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC, time ASC NULLS FIRST, created_at ASC, id ASC
            "#
        );

        sqlx::query_as::<_, Resource>(&query)
            .bind(kind)
            .bind(from)
            .bind(to)
            .fetch_all(executor)
            .await
    }

    /// Deletes a resource of the given kind
    ///
    /// Assignments are removed by the foreign key cascade.
    pub async fn delete<'e, E: PgExecutor<'e>>(
        executor: E,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_as_str() {
        assert_eq!(ResourceKind::CleaningSlot.as_str(), "cleaning_slot");
        assert_eq!(ResourceKind::Task.as_str(), "task");
    }

    #[test]
    fn test_resource_kind_defaults() {
        assert_eq!(ResourceKind::CleaningSlot.default_max_assignees(), 2);
        assert_eq!(ResourceKind::Task.default_max_assignees(), 1);
        assert_eq!(
            ResourceKind::CleaningSlot.default_time(),
            NaiveTime::from_hms_opt(9, 0, 0)
        );
        assert_eq!(ResourceKind::Task.default_time(), None);
    }

    #[test]
    fn test_resource_kind_policies() {
        assert!(ResourceKind::Task.creation_requires_admin());
        assert!(!ResourceKind::CleaningSlot.creation_requires_admin());
        assert!(ResourceKind::Task.is_deletable());
        assert!(!ResourceKind::CleaningSlot.is_deletable());
    }

    #[test]
    fn test_resource_kind_serde() {
        assert_eq!(
            serde_json::to_string(&ResourceKind::CleaningSlot).unwrap(),
            "\"cleaning_slot\""
        );
        let kind: ResourceKind = serde_json::from_str("\"task\"").unwrap();
        assert_eq!(kind, ResourceKind::Task);
    }
}
