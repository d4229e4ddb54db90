use serde::{Deserialize, Serialize};

use crate::enums::{MaintenanceStatus, Priority};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredPart {
    pub part_number: String,
    pub name: String,
    pub quantity: u32,
    pub available: bool,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Intervention request on a piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: String,
    pub title: String,
    pub equipment_name: String,
    pub equipment_location: String,
    pub priority: Priority,
    pub status: MaintenanceStatus,
    pub requested_by: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    pub estimated_duration_hours: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_parts: Vec<RequiredPart>,
}

impl MaintenanceRequest {
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.title.to_lowercase().contains(&term)
            || self.equipment_name.to_lowercase().contains(&term)
    }

    pub fn missing_parts(&self) -> usize {
        self.required_parts.iter().filter(|p| !p.available).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceFilter {
    pub search: String,
    pub priority: Option<Priority>,
    pub status: Option<MaintenanceStatus>,
}

impl MaintenanceFilter {
    pub fn apply<'a>(&self, requests: &'a [MaintenanceRequest]) -> Vec<&'a MaintenanceRequest> {
        requests
            .iter()
            .filter(|r| r.matches_search(&self.search))
            .filter(|r| self.priority.map_or(true, |p| r.priority == p))
            .filter(|r| self.status.map_or(true, |s| r.status == s))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaintenanceSummary {
    pub urgent: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub pending: usize,
}

impl MaintenanceSummary {
    pub fn compute(requests: &[MaintenanceRequest]) -> Self {
        let count_status =
            |status: MaintenanceStatus| requests.iter().filter(|r| r.status == status).count();
        Self {
            urgent: requests
                .iter()
                .filter(|r| r.priority == Priority::Urgent)
                .count(),
            in_progress: count_status(MaintenanceStatus::InProgress),
            completed: count_status(MaintenanceStatus::Completed),
            pending: count_status(MaintenanceStatus::Pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn test_summary_over_demo_requests() {
        let summary = MaintenanceSummary::compute(&demo::maintenance_requests());
        assert_eq!(
            summary,
            MaintenanceSummary {
                urgent: 1,
                in_progress: 1,
                completed: 1,
                pending: 1
            }
        );
    }

    #[test]
    fn test_filter_by_equipment_and_priority() {
        let requests = demo::maintenance_requests();
        let filter = MaintenanceFilter {
            search: "convoyeur".into(),
            priority: Some(Priority::Medium),
            status: None,
        };
        let hits = filter.apply(&requests);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "MNT-002");

        let filter = MaintenanceFilter {
            status: Some(MaintenanceStatus::Completed),
            ..Default::default()
        };
        assert_eq!(filter.apply(&requests)[0].id, "MNT-004");
    }

    #[test]
    fn test_missing_parts_counts_unavailable() {
        let requests = demo::maintenance_requests();
        assert_eq!(requests[0].missing_parts(), 1);
        assert_eq!(requests[3].missing_parts(), 0);
    }
}
