/// Listing and sign-up plumbing shared by cleaning slots and tasks
///
/// Both surfaces expose the same shapes; only the resource kind and the
/// create payload differ.

use crate::{app::AppState, error::ApiResult};
use axum::{http::StatusCode, Json};
use chrono::{NaiveDate, Utc};
use fenice_shared::{
    auth::middleware::FamilyContext,
    capacity::{self, BadgeSummary},
    ledger,
    models::{
        assignment::{Assignment, AssignmentWithFamily},
        resource::{Resource, ResourceKind, ResourceWithAssignments},
    },
    resources::{self, PageRequest},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Badges shown per resource when the client does not say
pub const DEFAULT_MAX_DISPLAY: usize = 3;

/// Query parameters for upcoming listings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// First date to include (default: today)
    pub from: Option<NaiveDate>,

    /// Rows to skip
    pub offset: Option<i64>,

    /// Page size (1-100)
    pub limit: Option<i64>,
}

/// One resource as seen by the requesting family
#[derive(Debug, Serialize)]
pub struct ResourceItem {
    #[serde(flatten)]
    pub resource: Resource,

    /// Current roster in sign-up order
    pub assignments: Vec<AssignmentWithFamily>,

    pub assignment_count: usize,

    /// Whether the requesting family may sign up now
    pub can_sign_up: bool,

    /// Whether the requesting family already holds a place
    pub signed_up: bool,
}

impl ResourceItem {
    pub fn for_family(item: ResourceWithAssignments, family_id: Uuid) -> Self {
        let can_sign_up = capacity::can_sign_up(&item, family_id);
        let signed_up = item.is_assigned(family_id);

        Self {
            assignment_count: item.occupied(),
            can_sign_up,
            signed_up,
            resource: item.resource,
            assignments: item.assignments,
        }
    }
}

/// Upcoming listing page
#[derive(Debug, Serialize)]
pub struct ResourcePage {
    pub items: Vec<ResourceItem>,
    pub total: i64,
    pub has_more: bool,
    pub offset: i64,
    pub limit: i64,
}

/// Query parameters for roster listings
#[derive(Debug, Default, Deserialize)]
pub struct RosterQuery {
    /// Names to show before summarizing as "+N" (default: 3)
    pub max_display: Option<usize>,
}

/// Roster of one resource
#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub assignments: Vec<AssignmentWithFamily>,
    pub badges: BadgeSummary,
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn list_upcoming(
    state: &AppState,
    ctx: &FamilyContext,
    kind: ResourceKind,
    query: ListQuery,
) -> ApiResult<Json<ResourcePage>> {
    let page = PageRequest::new(query.offset, query.limit, state.default_page_size());
    let from = query.from.unwrap_or_else(today);

    let listed = resources::list_upcoming(&state.db, ctx, kind, from, page).await?;

    Ok(Json(ResourcePage {
        items: listed
            .items
            .into_iter()
            .map(|item| ResourceItem::for_family(item, ctx.family_id))
            .collect(),
        total: listed.total,
        has_more: listed.has_more,
        offset: page.offset,
        limit: page.size,
    }))
}

pub async fn roster(
    state: &AppState,
    ctx: &FamilyContext,
    kind: ResourceKind,
    id: Uuid,
    query: RosterQuery,
) -> ApiResult<Json<RosterResponse>> {
    let assignments = ledger::list_for_resource(&state.db, ctx, kind, id).await?;
    let badges = capacity::summarize_badges(
        assignments.iter().map(|a| a.display_name.as_str()),
        query.max_display.unwrap_or(DEFAULT_MAX_DISPLAY),
    );

    Ok(Json(RosterResponse {
        assignments,
        badges,
    }))
}

pub async fn sign_up(
    state: &AppState,
    ctx: &FamilyContext,
    kind: ResourceKind,
    id: Uuid,
) -> ApiResult<(StatusCode, Json<Assignment>)> {
    let assignment = ledger::sign_up(&state.db, ctx, kind, id).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_roster(max_assignees: i32, families: &[Uuid]) -> ResourceWithAssignments {
        let id = Uuid::new_v4();
        ResourceWithAssignments {
            resource: Resource {
                id,
                kind: ResourceKind::Task,
                date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                time: None,
                title: "Addobbi di Natale".to_string(),
                description: None,
                max_assignees,
                created_by: None,
                created_at: Utc::now(),
            },
            assignments: families
                .iter()
                .map(|&family_id| AssignmentWithFamily {
                    id: Uuid::new_v4(),
                    resource_id: id,
                    family_id,
                    display_name: "Famiglia Rossi".to_string(),
                    created_at: Utc::now(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_item_flags_for_assignee() {
        let me = Uuid::new_v4();
        let item = ResourceItem::for_family(with_roster(2, &[me]), me);

        assert_eq!(item.assignment_count, 1);
        assert!(item.signed_up);
        assert!(!item.can_sign_up);
    }

    #[test]
    fn test_item_flags_for_full_resource() {
        let item = ResourceItem::for_family(with_roster(1, &[Uuid::new_v4()]), Uuid::new_v4());

        assert!(!item.signed_up);
        assert!(!item.can_sign_up);
    }

    #[test]
    fn test_item_serializes_flat() {
        let item = ResourceItem::for_family(with_roster(1, &[]), Uuid::new_v4());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["title"], "Addobbi di Natale");
        assert_eq!(json["kind"], "task");
        assert_eq!(json["assignment_count"], 0);
        assert_eq!(json["can_sign_up"], true);
    }
}
