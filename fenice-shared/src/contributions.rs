/// Volunteer-hour contributions
///
/// Any family records hours for itself; only admins delete records.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::FamilyContext;
use crate::db::context::begin_as;
use crate::error::{DomainError, DomainResult};
use crate::models::contribution::{ContributionWithFamily, NewContribution, TimeContribution};

fn validate(
    ctx: &FamilyContext,
    hours: f64,
    activity: &str,
    date: Option<NaiveDate>,
) -> DomainResult<NewContribution> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(DomainError::validation("hours", "must be a non-negative number"));
    }

    let activity = activity.trim();
    if activity.is_empty() {
        return Err(DomainError::validation("activity", "must not be blank"));
    }

    Ok(NewContribution {
        family_id: ctx.family_id,
        hours,
        activity: activity.to_string(),
        date,
    })
}

/// Records hours for the acting family
///
/// `date` defaults to today in the store.
pub async fn record(
    pool: &PgPool,
    ctx: &FamilyContext,
    hours: f64,
    activity: &str,
    date: Option<NaiveDate>,
) -> DomainResult<TimeContribution> {
    let data = validate(ctx, hours, activity, date)?;

    let mut tx = begin_as(pool, ctx).await?;
    let contribution = TimeContribution::insert(&mut *tx, data).await?;
    tx.commit().await?;

    info!(
        contribution_id = %contribution.id,
        family = %ctx.username,
        hours = contribution.hours,
        "Time contribution recorded"
    );

    Ok(contribution)
}

/// Every contribution, newest first
pub async fn list_all(pool: &PgPool, ctx: &FamilyContext) -> DomainResult<Vec<ContributionWithFamily>> {
    let mut tx = begin_as(pool, ctx).await?;
    let rows = TimeContribution::list_all(&mut *tx).await?;
    tx.commit().await?;

    Ok(rows)
}

/// Deletes a contribution (admin only)
pub async fn delete(pool: &PgPool, ctx: &FamilyContext, id: Uuid) -> DomainResult<()> {
    require_admin(ctx, "delete time contributions")?;

    let mut tx = begin_as(pool, ctx).await?;
    if !TimeContribution::delete(&mut *tx, id).await? {
        return Err(DomainError::NotFound(format!("time contribution {}", id)));
    }
    tx.commit().await?;

    info!(contribution_id = %id, family = %ctx.username, "Time contribution deleted");

    Ok(())
}
