/// Shared task endpoints
///
/// Creating and deleting tasks is reserved to admin families; the check is
/// made by the core operation so a non-admin request never writes anything.
///
/// # Endpoints
///
/// - `GET /v1/tasks` - Upcoming tasks, paged
/// - `POST /v1/tasks` - Create a task (admin)
/// - `DELETE /v1/tasks/:id` - Delete a task and its assignments (admin)
/// - `GET /v1/tasks/:id/assignments` - Roster and badges
/// - `POST /v1/tasks/:id/sign-up` - Take a place

use super::resources::{self as listing, ListQuery, ResourcePage, RosterQuery, RosterResponse};
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, NaiveTime};
use fenice_shared::{
    auth::middleware::FamilyContext,
    models::{
        assignment::Assignment,
        resource::{Resource, ResourceKind},
    },
    resources::{self, ResourceSpec},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    pub date: NaiveDate,

    pub time: Option<NaiveTime>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Families needed (default: 1)
    #[validate(range(min = 1, max = 50, message = "Places must be between 1 and 50"))]
    pub max_assignees: Option<i32>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ResourcePage>> {
    listing::list_upcoming(&state, &ctx, ResourceKind::Task, query).await
}

/// # Errors
///
/// - `403 Forbidden`: The family is not an admin
/// - `422 Unprocessable Entity`: Blank title or bad capacity
pub async fn create_task(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Resource>)> {
    req.validate()?;

    let task = resources::create(
        &state.db,
        &ctx,
        ResourceSpec {
            kind: ResourceKind::Task,
            date: req.date,
            time: req.time,
            title: req.title,
            description: req.description,
            max_assignees: req.max_assignees,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// # Errors
///
/// - `403 Forbidden`: The family is not an admin
/// - `404 Not Found`: No task with this id
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    resources::delete(&state.db, &ctx, ResourceKind::Task, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn task_assignments(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Path(id): Path<Uuid>,
    Query(query): Query<RosterQuery>,
) -> ApiResult<Json<RosterResponse>> {
    listing::roster(&state, &ctx, ResourceKind::Task, id, query).await
}

pub async fn sign_up(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Assignment>)> {
    listing::sign_up(&state, &ctx, ResourceKind::Task, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_defaults() {
        let req: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "date": "2026-12-01",
            "title": "Addobbi di Natale"
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.time, None);
        assert_eq!(req.max_assignees, None);
    }

    #[test]
    fn test_create_task_request_rejects_blank_title() {
        let req: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "date": "2026-12-01",
            "title": ""
        }))
        .unwrap();

        assert!(req.validate().unwrap_err().field_errors().contains_key("title"));
    }
}
