pub mod criticality_level;
pub mod maintenance_status;
pub mod notification_type;
pub mod order_status;
pub mod priority;
pub mod supplier_status;

pub use criticality_level::CriticalityLevel;
pub use maintenance_status::MaintenanceStatus;
pub use notification_type::NotificationType;
pub use order_status::OrderStatus;
pub use priority::Priority;
pub use supplier_status::SupplierStatus;
