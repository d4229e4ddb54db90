use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    Approved,
    PartsOrdered,
    PartsAvailable,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::Approved => "approved",
            MaintenanceStatus::PartsOrdered => "parts_ordered",
            MaintenanceStatus::PartsAvailable => "parts_available",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "En attente",
            MaintenanceStatus::Approved => "Approuvée",
            MaintenanceStatus::PartsOrdered => "Pièces commandées",
            MaintenanceStatus::PartsAvailable => "Pièces disponibles",
            MaintenanceStatus::InProgress => "En cours",
            MaintenanceStatus::Completed => "Terminée",
            MaintenanceStatus::Cancelled => "Annulée",
        }
    }

    /// Requests that still keep equipment out of production.
    pub fn is_open(&self) -> bool {
        !matches!(
            self,
            MaintenanceStatus::Completed | MaintenanceStatus::Cancelled
        )
    }

    pub fn all() -> Vec<MaintenanceStatus> {
        vec![
            MaintenanceStatus::Pending,
            MaintenanceStatus::Approved,
            MaintenanceStatus::PartsOrdered,
            MaintenanceStatus::PartsAvailable,
            MaintenanceStatus::InProgress,
            MaintenanceStatus::Completed,
            MaintenanceStatus::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(MaintenanceStatus::Pending),
            "approved" => Some(MaintenanceStatus::Approved),
            "parts_ordered" => Some(MaintenanceStatus::PartsOrdered),
            "parts_available" => Some(MaintenanceStatus::PartsAvailable),
            "in_progress" => Some(MaintenanceStatus::InProgress),
            "completed" => Some(MaintenanceStatus::Completed),
            "cancelled" => Some(MaintenanceStatus::Cancelled),
            _ => None,
        }
    }
}
