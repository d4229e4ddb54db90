use serde::{Deserialize, Serialize};

/// Ordinal severity tag of an inventory item, independent of its stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl CriticalityLevel {
    pub fn code(&self) -> &'static str {
        match self {
            CriticalityLevel::Low => "low",
            CriticalityLevel::Medium => "medium",
            CriticalityLevel::High => "high",
            CriticalityLevel::Critical => "critical",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CriticalityLevel::Low => "Faible",
            CriticalityLevel::Medium => "Moyenne",
            CriticalityLevel::High => "Élevée",
            CriticalityLevel::Critical => "Critique",
        }
    }

    pub fn all() -> Vec<CriticalityLevel> {
        vec![
            CriticalityLevel::Low,
            CriticalityLevel::Medium,
            CriticalityLevel::High,
            CriticalityLevel::Critical,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "low" => Some(CriticalityLevel::Low),
            "medium" => Some(CriticalityLevel::Medium),
            "high" => Some(CriticalityLevel::High),
            "critical" => Some(CriticalityLevel::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for CriticalityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
