/// Sign-up eligibility rules
///
/// Pure functions shared by the listing endpoints (to tell a caller whether
/// the sign-up button applies) and by the ledger (to re-check eligibility
/// under the row lock before writing).
///
/// The duplicate check always runs before the capacity check, so a family
/// that already holds a place on a full resource gets `AlreadyAssigned`, not
/// `Full`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::models::resource::ResourceWithAssignments;

/// Cleaning areas offered by the dashboard
pub const CLEANING_AREAS: [&str; 6] = ["Cucina", "Bagni", "Aule", "Corridoi", "Giardino", "Mensa"];

/// Checks whether `family_id` may take a place on a resource
///
/// `assigned` holds the family IDs currently on the roster.
///
/// # Errors
///
/// - `AlreadyAssigned` if `family_id` is in `assigned`
/// - `Full` if the roster has reached `max_assignees`
pub fn check_sign_up(max_assignees: i32, assigned: &[Uuid], family_id: Uuid) -> DomainResult<()> {
    if assigned.contains(&family_id) {
        return Err(DomainError::AlreadyAssigned);
    }

    if assigned.len() >= capacity(max_assignees) {
        return Err(DomainError::Full);
    }

    Ok(())
}

/// True iff the family holds no place on the resource and a place is free
pub fn can_sign_up(resource: &ResourceWithAssignments, family_id: Uuid) -> bool {
    !resource.is_assigned(family_id) && resource.occupied() < capacity(resource.resource.max_assignees)
}

fn capacity(max_assignees: i32) -> usize {
    usize::try_from(max_assignees).unwrap_or(0)
}

/// Attendee badges for one resource, truncated for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSummary {
    /// Display names to render, in sign-up order
    pub shown: Vec<String>,

    /// Number of further assignees summarized as "+N"
    pub remaining: usize,
}

/// Keeps the first `max_display` names and counts the rest
pub fn summarize_badges<I, S>(names: I, max_display: usize) -> BadgeSummary
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut shown = Vec::new();
    let mut remaining = 0;

    for name in names {
        if shown.len() < max_display {
            shown.push(name.into());
        } else {
            remaining += 1;
        }
    }

    BadgeSummary { shown, remaining }
}
