/// Volunteer-hour endpoints
///
/// # Endpoints
///
/// - `GET /v1/contributions` - All records, newest first
/// - `POST /v1/contributions` - Record hours for the requesting family
/// - `GET /v1/contributions/summary` - Totals for the header and chart
/// - `DELETE /v1/contributions/:id` - Delete a record (admin)

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use fenice_shared::{
    auth::middleware::FamilyContext,
    contributions,
    models::contribution::{ContributionWithFamily, TimeContribution},
    reporting::{self, ContributionSummary},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Record contribution request
#[derive(Debug, Deserialize, Validate)]
pub struct RecordContributionRequest {
    #[validate(range(min = 0.0, max = 1000.0, message = "Hours must be between 0 and 1000"))]
    pub hours: f64,

    #[validate(length(min = 1, max = 500, message = "Activity must be 1-500 characters"))]
    pub activity: String,

    /// Day of the activity (default: today)
    pub date: Option<NaiveDate>,
}

pub async fn list_contributions(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
) -> ApiResult<Json<Vec<ContributionWithFamily>>> {
    let rows = contributions::list_all(&state.db, &ctx).await?;
    Ok(Json(rows))
}

pub async fn record_contribution(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Json(req): Json<RecordContributionRequest>,
) -> ApiResult<(StatusCode, Json<TimeContribution>)> {
    req.validate()?;

    let recorded = contributions::record(&state.db, &ctx, req.hours, &req.activity, req.date).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

/// Aggregates over every loaded record
pub async fn summary(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
) -> ApiResult<Json<ContributionSummary>> {
    let rows = contributions::list_all(&state.db, &ctx).await?;
    Ok(Json(reporting::summarize(&rows)))
}

pub async fn delete_contribution(
    State(state): State<AppState>,
    Extension(ctx): Extension<FamilyContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    contributions::delete(&state.db, &ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request_validation() {
        let ok: RecordContributionRequest = serde_json::from_value(serde_json::json!({
            "hours": 2.5,
            "activity": "Pulizia cortile"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad: RecordContributionRequest = serde_json::from_value(serde_json::json!({
            "hours": -1.0,
            "activity": ""
        }))
        .unwrap();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("hours"));
        assert!(errors.field_errors().contains_key("activity"));
    }
}
