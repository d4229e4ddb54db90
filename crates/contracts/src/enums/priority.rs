use serde::{Deserialize, Serialize};

/// Urgency of a maintenance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn code(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Faible",
            Priority::Medium => "Moyenne",
            Priority::High => "Élevée",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn all() -> Vec<Priority> {
        vec![Priority::Low, Priority::Medium, Priority::High, Priority::Urgent]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }
}
