/// Cleaning slot endpoints
///
/// Any family may open a slot; slots are never deleted.
///
/// # Endpoints
///
/// - `GET /v1/cleaning-slots` - Upcoming slots, paged
/// - `POST /v1/cleaning-slots` - Open a slot
/// - `GET /v1/cleaning-slots/calendar` - Per-day occupancy
/// - `GET /v1/cleaning-slots/areas` - Known cleaning areas
/// - `GET /v1/cleaning-slots/:id/assignments` - Roster and badges
/// - `POST /v1/cleaning-slots/:id/sign-up` - Take a place

use super::resources::{self as listing, ListQuery, ResourcePage, RosterQuery, RosterResponse};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, NaiveDate, NaiveTime};
use fenice_shared::{
    auth::middleware::FamilyContext,
    capacity::CLEANING_AREAS,
    models::{
        assignment::Assignment,
        resource::{Resource, ResourceKind},
    },
    reporting::CalendarDay,
    resources::{self, ResourceSpec},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Longest calendar window a client may request, in days
pub const MAX_CALENDAR_DAYS: i64 = 366;

/// Window shown when the client sends no `to`
const DEFAULT_CALENDAR_DAYS: i64 = 30;

/// Open slot request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSlotRequest {
    pub date: NaiveDate,

    /// Start time (default: 09:00)
    pub time: Option<NaiveTime>,

    /// Cleaning area, e.g. "Cucina"
    #[validate(length(min = 1, max = 255, message = "Area must be 1-255 characters"))]
    pub area: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Places available (default: 2)
    #[validate(range(min = 1, max = 50, message = "Places must be between 1 and 50"))]
    pub max_assignees: Option<i32>,
}

/// Calendar query
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// First day (default: today)
    pub from: Option<NaiveDate>,

    /// Last day, inclusive (default: 30 days after `from`)
    pub to: Option<NaiveDate>,
}

/// Calendar response
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<CalendarDay>,
}

/// Areas response
#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<&'static str>,
}

pub async fn list_slots(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ResourcePage>> {
    listing::list_upcoming(&state, &ctx, ResourceKind::CleaningSlot, query).await
}

pub async fn create_slot(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Json(req): Json<CreateSlotRequest>,
) -> ApiResult<(StatusCode, Json<Resource>)> {
    req.validate()?;

    let slot = resources::create(
        &state.db,
        &ctx,
        ResourceSpec {
            kind: ResourceKind::CleaningSlot,
            date: req.date,
            time: req.time,
            title: req.area,
            description: req.description,
            max_assignees: req.max_assignees,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

/// Resolves the calendar window, defaulting and bounding it
pub fn calendar_window(query: &CalendarQuery, today: NaiveDate) -> ApiResult<(NaiveDate, NaiveDate)> {
    let from = query.from.unwrap_or(today);
    let to = match query.to {
        Some(to) => to,
        None => from
            .checked_add_signed(Duration::days(DEFAULT_CALENDAR_DAYS))
            .ok_or_else(|| {
                ApiError::ValidationError(vec![ValidationErrorDetail {
                    field: "from".to_string(),
                    message: "date is out of range".to_string(),
                }])
            })?,
    };

    if to < from {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "to".to_string(),
            message: "must not be before from".to_string(),
        }]));
    }

    if (to - from).num_days() >= MAX_CALENDAR_DAYS {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "to".to_string(),
            message: format!("window must be shorter than {} days", MAX_CALENDAR_DAYS),
        }]));
    }

    Ok((from, to))
}

pub async fn calendar(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Json<CalendarResponse>> {
    let (from, to) = calendar_window(&query, listing::today())?;
    let days = resources::calendar(&state.db, &ctx, ResourceKind::CleaningSlot, from, to).await?;

    Ok(Json(CalendarResponse { from, to, days }))
}

pub async fn areas() -> Json<AreasResponse> {
    Json(AreasResponse {
        areas: CLEANING_AREAS.to_vec(),
    })
}

pub async fn slot_assignments(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Path(id): Path<Uuid>,
    Query(query): Query<RosterQuery>,
) -> ApiResult<Json<RosterResponse>> {
    listing::roster(&state, &ctx, ResourceKind::CleaningSlot, id, query).await
}

pub async fn sign_up(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Assignment>)> {
    listing::sign_up(&state, &ctx, ResourceKind::CleaningSlot, id).await
}
