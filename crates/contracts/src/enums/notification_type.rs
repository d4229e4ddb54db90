use serde::{Deserialize, Serialize};

/// Category of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    StockLow,
    StockCritical,
    OrderApproved,
    OrderDelivered,
    MaintenanceDue,
    EquipmentBreakdown,
    SystemUpdate,
}

impl NotificationType {
    pub fn code(&self) -> &'static str {
        match self {
            NotificationType::StockLow => "stock_low",
            NotificationType::StockCritical => "stock_critical",
            NotificationType::OrderApproved => "order_approved",
            NotificationType::OrderDelivered => "order_delivered",
            NotificationType::MaintenanceDue => "maintenance_due",
            NotificationType::EquipmentBreakdown => "equipment_breakdown",
            NotificationType::SystemUpdate => "system_update",
        }
    }

    /// Icon name understood by the frontend icon set
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::StockLow | NotificationType::StockCritical => "alert-triangle",
            NotificationType::OrderApproved | NotificationType::OrderDelivered => "truck",
            NotificationType::MaintenanceDue | NotificationType::EquipmentBreakdown => "wrench",
            NotificationType::SystemUpdate => "bell",
        }
    }
}
