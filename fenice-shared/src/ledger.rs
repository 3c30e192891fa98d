/// Assignment ledger
///
/// Sign-up is one atomic unit: the resource row is locked with
/// `SELECT ... FOR UPDATE`, eligibility is re-checked against the locked
/// roster, and the insert is guarded by the `(resource_id, family_id)`
/// unique constraint. Two families racing for the last place are serialized
/// by the lock; exactly one of them gets `Full`.

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::middleware::FamilyContext;
use crate::capacity::check_sign_up;
use crate::db::context::begin_as;
use crate::error::{DomainError, DomainResult};
use crate::models::assignment::{Assignment, AssignmentWithFamily};
use crate::models::resource::{Resource, ResourceKind};

/// Signs the acting family up for a resource
///
/// The caller re-reads the resource afterwards to observe the new occupancy.
///
/// # Errors
///
/// - `NotFound` if no resource of that kind has this id
/// - `AlreadyAssigned` if the family already holds a place
/// - `Full` if every place is taken
pub async fn sign_up(
    pool: &PgPool,
    ctx: &FamilyContext,
    kind: ResourceKind,
    resource_id: Uuid,
) -> DomainResult<Assignment> {
    let mut tx = begin_as(pool, ctx).await?;

    let resource = Resource::find_for_update(&mut *tx, kind, resource_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("{} {}", kind.label(), resource_id)))?;

    let assigned = Assignment::family_ids_for_resource(&mut *tx, resource.id).await?;
    if let Err(e) = check_sign_up(resource.max_assignees, &assigned, ctx.family_id) {
        debug!(
            resource_id = %resource.id,
            family = %ctx.username,
            occupied = assigned.len(),
            max_assignees = resource.max_assignees,
            reason = %e,
            "Sign-up rejected"
        );
        return Err(e);
    }

    let assignment = Assignment::insert_if_absent(&mut *tx, resource.id, ctx.family_id)
        .await?
        .ok_or(DomainError::AlreadyAssigned)?;

    tx.commit().await?;

    info!(
        resource_id = %resource.id,
        kind = kind.as_str(),
        family = %ctx.username,
        occupied = assigned.len() + 1,
        max_assignees = resource.max_assignees,
        "Family signed up"
    );

    Ok(assignment)
}

/// Current roster of a resource, with family display names
///
/// # Errors
///
/// - `NotFound` if no resource of that kind has this id
pub async fn list_for_resource(
    pool: &PgPool,
    ctx: &FamilyContext,
    kind: ResourceKind,
    resource_id: Uuid,
) -> DomainResult<Vec<AssignmentWithFamily>> {
    let mut tx = begin_as(pool, ctx).await?;

    if Resource::find(&mut *tx, kind, resource_id).await?.is_none() {
        return Err(DomainError::NotFound(format!("{} {}", kind.label(), resource_id)));
    }

    let assignments = Assignment::list_for_resource(&mut *tx, resource_id).await?;
    tx.commit().await?;

    Ok(assignments)
}
