/// Aggregates for the dashboard
///
/// Everything here is computed over rows the caller has already loaded, not
/// pushed down to the store, so results are only as complete as the input.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::contribution::ContributionWithFamily;
use crate::models::resource::ResourceWithAssignments;

/// Sum of hours across all contributions
pub fn total_hours(contributions: &[ContributionWithFamily]) -> f64 {
    contributions.iter().map(|c| c.hours).sum()
}

/// Hours summed for one family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyTotal {
    pub display_name: String,
    pub hours: f64,
}

/// Hours per family display name, highest first
///
/// Ties are broken by name so the chart order is stable.
pub fn per_family_totals(contributions: &[ContributionWithFamily]) -> Vec<FamilyTotal> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for c in contributions {
        *sums.entry(c.display_name.as_str()).or_insert(0.0) += c.hours;
    }

    let mut totals: Vec<FamilyTotal> = sums
        .into_iter()
        .map(|(name, hours)| FamilyTotal {
            display_name: name.to_string(),
            hours,
        })
        .collect();

    totals.sort_by(|a, b| {
        b.hours
            .total_cmp(&a.hours)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    totals
}

/// Number of distinct family display names
pub fn unique_contributor_count(contributions: &[ContributionWithFamily]) -> usize {
    contributions
        .iter()
        .map(|c| c.display_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Header and chart figures for the contributions view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionSummary {
    pub total_hours: f64,
    pub unique_contributors: usize,
    pub per_family: Vec<FamilyTotal>,
}

pub fn summarize(contributions: &[ContributionWithFamily]) -> ContributionSummary {
    ContributionSummary {
        total_hours: total_hours(contributions),
        unique_contributors: unique_contributor_count(contributions),
        per_family: per_family_totals(contributions),
    }
}

/// Calendar-day colour class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyStatus {
    /// No resources on that day
    None,
    /// Resources exist and nobody has signed up
    Available,
    /// Some places taken
    Partial,
    /// Every place taken
    Full,
}

/// Occupancy of one day's resources, summed across them
pub fn occupancy_status<'a, I>(resources: I) -> OccupancyStatus
where
    I: IntoIterator<Item = &'a ResourceWithAssignments>,
{
    let mut any = false;
    let mut available: i64 = 0;
    let mut occupied: i64 = 0;

    for r in resources {
        any = true;
        available += i64::from(r.resource.max_assignees);
        occupied += r.occupied() as i64;
    }

    if !any {
        OccupancyStatus::None
    } else if occupied >= available {
        OccupancyStatus::Full
    } else if occupied > 0 {
        OccupancyStatus::Partial
    } else {
        OccupancyStatus::Available
    }
}

/// Status of one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: OccupancyStatus,
}

/// One entry per day in `[from, to]`, computed from the resources in the window
///
/// Returns an empty list when `to` is before `from`.
pub fn calendar(
    from: NaiveDate,
    to: NaiveDate,
    resources: &[ResourceWithAssignments],
) -> Vec<CalendarDay> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ResourceWithAssignments>> = BTreeMap::new();
    for r in resources {
        by_day.entry(r.resource.date).or_default().push(r);
    }

    from.iter_days()
        .take_while(|day| *day <= to)
        .map(|date| CalendarDay {
            date,
            status: by_day
                .get(&date)
                .map(|rs| occupancy_status(rs.iter().copied()))
                .unwrap_or(OccupancyStatus::None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignment::AssignmentWithFamily;
    use crate::models::resource::{Resource, ResourceKind};
    use chrono::Utc;
    use uuid::Uuid;

    fn contribution(name: &str, hours: f64) -> ContributionWithFamily {
        ContributionWithFamily {
            id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            display_name: name.to_string(),
            hours,
            activity: "Pulizia giardino".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn resource_on(date: NaiveDate, max_assignees: i32, occupied: usize) -> ResourceWithAssignments {
        let id = Uuid::new_v4();
        ResourceWithAssignments {
            resource: Resource {
                id,
                kind: ResourceKind::CleaningSlot,
                date,
                time: None,
                title: "Bagni".to_string(),
                description: None,
                max_assignees,
                created_by: None,
                created_at: Utc::now(),
            },
            assignments: (0..occupied)
                .map(|_| AssignmentWithFamily {
                    id: Uuid::new_v4(),
                    resource_id: id,
                    family_id: Uuid::new_v4(),
                    display_name: "Famiglia".to_string(),
                    created_at: Utc::now(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_contribution_aggregates() {
        let rows = vec![
            contribution("Rossi", 2.5),
            contribution("Bianchi", 1.0),
            contribution("Rossi", 3.0),
        ];

        assert_eq!(total_hours(&rows), 6.5);
        assert_eq!(unique_contributor_count(&rows), 2);
        assert_eq!(
            per_family_totals(&rows),
            vec![
                FamilyTotal {
                    display_name: "Rossi".to_string(),
                    hours: 5.5
                },
                FamilyTotal {
                    display_name: "Bianchi".to_string(),
                    hours: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_per_family_ties_sorted_by_name() {
        let rows = vec![contribution("Verdi", 2.0), contribution("Bianchi", 2.0)];
        let names: Vec<_> = per_family_totals(&rows)
            .into_iter()
            .map(|t| t.display_name)
            .collect();
        assert_eq!(names, vec!["Bianchi", "Verdi"]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.unique_contributors, 0);
        assert!(summary.per_family.is_empty());
    }

    #[test]
    fn test_occupancy_status() {
        assert_eq!(
            occupancy_status(&[] as &[ResourceWithAssignments]),
            OccupancyStatus::None
        );
        assert_eq!(
            occupancy_status(&[resource_on(day(1), 2, 0), resource_on(day(1), 2, 0)]),
            OccupancyStatus::Available
        );
        assert_eq!(
            occupancy_status(&[resource_on(day(1), 2, 1), resource_on(day(1), 2, 0)]),
            OccupancyStatus::Partial
        );
        assert_eq!(
            occupancy_status(&[resource_on(day(1), 2, 2), resource_on(day(1), 2, 2)]),
            OccupancyStatus::Full
        );
    }

    #[test]
    fn test_calendar_covers_every_day() {
        let resources = vec![resource_on(day(2), 2, 2), resource_on(day(4), 2, 1)];
        let days = calendar(day(1), day(5), &resources);

        let statuses: Vec<_> = days.iter().map(|d| d.status).collect();
        assert_eq!(
            statuses,
            vec![
                OccupancyStatus::None,
                OccupancyStatus::Full,
                OccupancyStatus::None,
                OccupancyStatus::Partial,
                OccupancyStatus::None,
            ]
        );
        assert_eq!(days[0].date, day(1));
        assert_eq!(days[4].date, day(5));
    }

    #[test]
    fn test_calendar_empty_window() {
        assert!(calendar(day(5), day(1), &[]).is_empty());
    }
}
