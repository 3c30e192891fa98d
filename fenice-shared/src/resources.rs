/// Capacity-bounded resource pool
///
/// Lifecycle of cleaning slots and tasks. Every operation takes the acting
/// [`FamilyContext`] explicitly and runs inside a transaction opened with
/// [`begin_as`], so row-level policies always see the right family.
///
/// Policy per kind:
///
/// | Kind | Create | Delete |
/// |---|---|---|
/// | Cleaning slot | any family | never |
/// | Task | admin only | admin only |

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::FamilyContext;
use crate::db::context::begin_as;
use crate::error::{DomainError, DomainResult};
use crate::models::assignment::{Assignment, AssignmentWithFamily};
use crate::models::resource::{NewResource, Resource, ResourceKind, ResourceWithAssignments};
use crate::reporting::{self, CalendarDay};

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: i64 = 30;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Caller input for creating a resource
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    pub date: NaiveDate,
    /// Defaults per kind when `None`
    pub time: Option<NaiveTime>,
    /// Cleaning area or task title
    pub title: String,
    pub description: Option<String>,
    /// Defaults per kind when `None`
    pub max_assignees: Option<i32>,
}

/// Offset window into a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub size: i64,
}

impl PageRequest {
    /// Builds a window, clamping offset to `>= 0` and size to `1..=MAX_PAGE_SIZE`
    pub fn new(offset: Option<i64>, size: Option<i64>, default_size: i64) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            size: size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Rows matching the filter across all pages
    pub total: i64,
    pub has_more: bool,
}

/// Whether rows exist beyond a page that started at `offset`
pub fn has_more(total: i64, offset: i64, returned: usize) -> bool {
    total > offset + returned as i64
}

fn validate_spec(spec: ResourceSpec, ctx: &FamilyContext) -> DomainResult<NewResource> {
    let title = spec.title.trim();
    if title.is_empty() {
        let field = match spec.kind {
            ResourceKind::CleaningSlot => "area",
            ResourceKind::Task => "title",
        };
        return Err(DomainError::validation(field, "must not be blank"));
    }

    let max_assignees = spec
        .max_assignees
        .unwrap_or_else(|| spec.kind.default_max_assignees());
    if max_assignees < 1 {
        return Err(DomainError::validation("max_assignees", "must be at least 1"));
    }

    let description = spec
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(NewResource {
        kind: spec.kind,
        date: spec.date,
        time: spec.time.or_else(|| spec.kind.default_time()),
        title: title.to_string(),
        description,
        max_assignees,
        created_by: Some(ctx.family_id),
    })
}

/// Creates a resource
///
/// # Errors
///
/// - `PermissionDenied` if a non-admin creates a task (checked before any write)
/// - `Validation` if the title/area is blank or `max_assignees < 1`
pub async fn create(pool: &PgPool, ctx: &FamilyContext, spec: ResourceSpec) -> DomainResult<Resource> {
    if spec.kind.creation_requires_admin() {
        require_admin(ctx, "create tasks")?;
    }

    let data = validate_spec(spec, ctx)?;

    let mut tx = begin_as(pool, ctx).await?;
    let resource = Resource::insert(&mut *tx, data).await?;
    tx.commit().await?;

    info!(
        resource_id = %resource.id,
        kind = resource.kind.as_str(),
        date = %resource.date,
        family = %ctx.username,
        "Resource created"
    );

    Ok(resource)
}

/// Attaches current rosters to loaded resources, preserving their order
async fn with_assignments(
    conn: &mut PgConnection,
    resources: Vec<Resource>,
) -> DomainResult<Vec<ResourceWithAssignments>> {
    let ids: Vec<Uuid> = resources.iter().map(|r| r.id).collect();

    let mut rosters: HashMap<Uuid, Vec<AssignmentWithFamily>> = HashMap::new();
    for assignment in Assignment::list_for_resources(&mut *conn, &ids).await? {
        rosters
            .entry(assignment.resource_id)
            .or_default()
            .push(assignment);
    }

    Ok(resources
        .into_iter()
        .map(|resource| {
            let assignments = rosters.remove(&resource.id).unwrap_or_default();
            ResourceWithAssignments {
                resource,
                assignments,
            }
        })
        .collect())
}

/// Lists one page of resources dated on or after `from`
///
/// Each call is independent; a follow-up page is requested with a larger
/// offset.
pub async fn list_upcoming(
    pool: &PgPool,
    ctx: &FamilyContext,
    kind: ResourceKind,
    from: NaiveDate,
    page: PageRequest,
) -> DomainResult<Page<ResourceWithAssignments>> {
    let mut tx = begin_as(pool, ctx).await?;

    let total = Resource::count_upcoming(&mut *tx, kind, from).await?;
    let resources = Resource::list_upcoming(&mut *tx, kind, from, page.size, page.offset).await?;
    let items = with_assignments(&mut *tx, resources).await?;

    tx.commit().await?;

    Ok(Page {
        has_more: has_more(total, page.offset, items.len()),
        items,
        total,
    })
}

/// Lists every resource of `kind` dated within `[from, to]`
pub async fn list_between(
    pool: &PgPool,
    ctx: &FamilyContext,
    kind: ResourceKind,
    from: NaiveDate,
    to: NaiveDate,
) -> DomainResult<Vec<ResourceWithAssignments>> {
    if to < from {
        return Err(DomainError::validation("to", "must not be before from"));
    }

    let mut tx = begin_as(pool, ctx).await?;
    let resources = Resource::list_between(&mut *tx, kind, from, to).await?;
    let items = with_assignments(&mut *tx, resources).await?;
    tx.commit().await?;

    Ok(items)
}

/// Occupancy status for each day of `[from, to]`
pub async fn calendar(
    pool: &PgPool,
    ctx: &FamilyContext,
    kind: ResourceKind,
    from: NaiveDate,
    to: NaiveDate,
) -> DomainResult<Vec<CalendarDay>> {
    let resources = list_between(pool, ctx, kind, from, to).await?;
    Ok(reporting::calendar(from, to, &resources))
}

/// Deletes a resource together with its assignments
///
/// # Errors
///
/// - `PermissionDenied` for cleaning slots, or for non-admin families
/// - `NotFound` if no resource of that kind has this id
pub async fn delete(
    pool: &PgPool,
    ctx: &FamilyContext,
    kind: ResourceKind,
    id: Uuid,
) -> DomainResult<()> {
    if !kind.is_deletable() {
        return Err(DomainError::PermissionDenied(format!(
            "{}s cannot be deleted",
            kind.label()
        )));
    }
    require_admin(ctx, "delete tasks")?;

    let mut tx = begin_as(pool, ctx).await?;
    let deleted = Resource::delete(&mut *tx, kind, id).await?;
    if !deleted {
        return Err(DomainError::NotFound(format!("{} {}", kind.label(), id)));
    }
    tx.commit().await?;

    info!(resource_id = %id, kind = kind.as_str(), family = %ctx.username, "Resource deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> FamilyContext {
        FamilyContext::new(Uuid::new_v4(), "rossi", false)
    }

    fn spec(kind: ResourceKind, title: &str) -> ResourceSpec {
        ResourceSpec {
            kind,
            date: NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
            time: None,
            title: title.to_string(),
            description: None,
            max_assignees: None,
        }
    }

    #[test]
    fn test_page_request_defaults_and_clamps() {
        assert_eq!(PageRequest::default(), PageRequest { offset: 0, size: 30 });
        assert_eq!(
            PageRequest::new(Some(-5), Some(0), DEFAULT_PAGE_SIZE),
            PageRequest { offset: 0, size: 1 }
        );
        assert_eq!(
            PageRequest::new(Some(30), Some(500), DEFAULT_PAGE_SIZE),
            PageRequest { offset: 30, size: MAX_PAGE_SIZE }
        );
    }

    #[test]
    fn test_has_more_over_35_rows() {
        assert!(has_more(35, 0, 30));
        assert!(!has_more(35, 30, 5));
        assert!(!has_more(0, 0, 0));
    }

    #[test]
    fn test_cleaning_slot_defaults() {
        let ctx = ctx();
        let data = validate_spec(spec(ResourceKind::CleaningSlot, " Cucina "), &ctx).unwrap();

        assert_eq!(data.title, "Cucina");
        assert_eq!(data.max_assignees, 2);
        assert_eq!(data.time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(data.created_by, Some(ctx.family_id));
    }

    #[test]
    fn test_task_defaults() {
        let data = validate_spec(spec(ResourceKind::Task, "Riparare il cancello"), &ctx()).unwrap();
        assert_eq!(data.max_assignees, 1);
        assert_eq!(data.time, None);
    }

    #[test]
    fn test_validation_rejects_blank_and_zero_capacity() {
        let err = validate_spec(spec(ResourceKind::CleaningSlot, "  "), &ctx()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "area"));

        let mut zero = spec(ResourceKind::Task, "Volantini");
        zero.max_assignees = Some(0);
        let err = validate_spec(zero, &ctx()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "max_assignees"));
    }

    #[test]
    fn test_blank_description_dropped() {
        let mut s = spec(ResourceKind::Task, "Volantini");
        s.description = Some("   ".to_string());
        assert_eq!(validate_spec(s, &ctx()).unwrap().description, None);
    }
}
