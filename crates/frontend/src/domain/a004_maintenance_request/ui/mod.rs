pub mod list;

pub use list::MaintenanceRequestList;
