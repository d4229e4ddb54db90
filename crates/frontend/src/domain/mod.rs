pub mod a001_spare_part;
pub mod a002_supplier;
pub mod a003_purchase_order;
pub mod a004_maintenance_request;
