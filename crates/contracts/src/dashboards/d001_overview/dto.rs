use serde::{Deserialize, Serialize};

use crate::domain::a001_spare_part::{SparePart, StockStatus};
use crate::domain::a002_supplier::Supplier;
use crate::domain::a003_purchase_order::PurchaseOrder;
use crate::domain::a004_maintenance_request::MaintenanceRequest;
use crate::enums::SupplierStatus;

/// Headline figures of the overview dashboard
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of part references
    pub total_parts: usize,
    /// Parts at or under their minimum but above half of it
    pub low_stock_parts: usize,
    /// Parts at or under half their minimum, including empty shelves
    pub critical_stock_parts: usize,
    /// Orders waiting for approval or delivery
    pub pending_orders: usize,
    /// Sum of every order amount
    pub total_order_value: f64,
    /// Mean lead time of active suppliers, in days
    pub average_lead_time: f64,
    /// Requests not completed nor cancelled
    pub maintenance_requests: usize,
    /// Estimated hours of open interventions
    pub equipment_downtime: u32,
}

impl DashboardStats {
    pub fn compute(
        parts: &[SparePart],
        orders: &[PurchaseOrder],
        requests: &[MaintenanceRequest],
        suppliers: &[Supplier],
    ) -> Self {
        let mut low_stock_parts = 0;
        let mut critical_stock_parts = 0;
        for part in parts {
            match part.stock_status() {
                StockStatus::Low => low_stock_parts += 1,
                StockStatus::Critical | StockStatus::OutOfStock => critical_stock_parts += 1,
                StockStatus::Ok => {}
            }
        }

        let active: Vec<_> = suppliers
            .iter()
            .filter(|s| s.status == SupplierStatus::Active)
            .collect();
        let average_lead_time = if active.is_empty() {
            0.0
        } else {
            active.iter().map(|s| s.lead_time_days as f64).sum::<f64>() / active.len() as f64
        };

        let open: Vec<_> = requests.iter().filter(|r| r.status.is_open()).collect();

        Self {
            total_parts: parts.len(),
            low_stock_parts,
            critical_stock_parts,
            pending_orders: orders.iter().filter(|o| o.status.is_in_progress()).count(),
            total_order_value: orders.iter().map(|o| o.total_amount).sum(),
            average_lead_time,
            maintenance_requests: open.len(),
            equipment_downtime: open.iter().map(|r| r.estimated_duration_hours).sum(),
        }
    }

    /// Parts that need attention, either level
    pub fn stock_alerts(&self) -> usize {
        self.low_stock_parts + self.critical_stock_parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn test_compute_over_demo_data() {
        let stats = DashboardStats::compute(
            &demo::spare_parts(),
            &demo::purchase_orders(),
            &demo::maintenance_requests(),
            &demo::suppliers(),
        );
        assert_eq!(stats.total_parts, 4);
        assert_eq!(stats.low_stock_parts, 1);
        assert_eq!(stats.critical_stock_parts, 2);
        assert_eq!(stats.stock_alerts(), 3);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.average_lead_time, 4.0);
        assert_eq!(stats.maintenance_requests, 3);
        assert_eq!(stats.equipment_downtime, 13);
    }

    #[test]
    fn test_empty_inputs_give_zeroes() {
        assert_eq!(DashboardStats::compute(&[], &[], &[], &[]), DashboardStats::default());
    }
}
