use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    Active,
    Inactive,
    Pending,
}

impl SupplierStatus {
    pub fn code(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "active",
            SupplierStatus::Inactive => "inactive",
            SupplierStatus::Pending => "pending",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "Actif",
            SupplierStatus::Inactive => "Inactif",
            SupplierStatus::Pending => "En attente",
        }
    }

    pub fn all() -> Vec<SupplierStatus> {
        vec![
            SupplierStatus::Active,
            SupplierStatus::Inactive,
            SupplierStatus::Pending,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(SupplierStatus::Active),
            "inactive" => Some(SupplierStatus::Inactive),
            "pending" => Some(SupplierStatus::Pending),
            _ => None,
        }
    }
}
