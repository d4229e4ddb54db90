//! Data behind the overview dashboard.

use contracts::dashboards::d001_overview::DashboardStats;
use contracts::domain::a001_spare_part::{SparePart, StockStatus};
use contracts::domain::a002_supplier::Supplier;
use contracts::domain::a003_purchase_order::{most_recent, PurchaseOrder};
use contracts::domain::a004_maintenance_request::MaintenanceRequest;
use contracts::enums::Priority;

use crate::domain::{a001_spare_part, a002_supplier, a003_purchase_order, a004_maintenance_request};
use crate::shared::backend::Backend;
use crate::shared::error::AppError;
use crate::shared::hooks::QueryOptions;

pub const RECENT_LIMIT: usize = 5;
pub const REFRESH_INTERVAL_MS: u32 = 60_000;

/// Auto-refresh on `REFRESH_INTERVAL_MS`; the staleness window is capped at
/// half an interval so every tick refetches even after a slow response
pub fn refresh_options(base: QueryOptions) -> QueryOptions {
    let stale_time_ms = base.stale_time_ms.min(i64::from(REFRESH_INTERVAL_MS / 2));
    base.refetch_every(REFRESH_INTERVAL_MS).stale_time(stale_time_ms)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub stats: DashboardStats,
    pub recent_orders: Vec<PurchaseOrder>,
    pub low_stock: Vec<SparePart>,
    pub open_requests: Vec<MaintenanceRequest>,
}

fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Urgent => 0,
        Priority::High => 1,
        Priority::Medium => 2,
        Priority::Low => 3,
    }
}

/// Parts under their minimum, emptiest shelves first
pub fn low_stock_parts(parts: &[SparePart], limit: usize) -> Vec<SparePart> {
    let mut low: Vec<SparePart> = parts
        .iter()
        .filter(|p| p.stock_status() != StockStatus::Ok)
        .cloned()
        .collect();
    low.sort_by(|a, b| {
        let ratio = |p: &SparePart| p.current_stock as f64 / p.minimum_stock.max(1) as f64;
        ratio(a).total_cmp(&ratio(b))
    });
    low.truncate(limit);
    low
}

/// Open requests, most pressing first
pub fn open_requests(requests: &[MaintenanceRequest], limit: usize) -> Vec<MaintenanceRequest> {
    let mut open: Vec<MaintenanceRequest> = requests
        .iter()
        .filter(|r| r.status.is_open())
        .cloned()
        .collect();
    open.sort_by_key(|r| priority_rank(r.priority));
    open.truncate(limit);
    open
}

impl Overview {
    pub fn build(
        parts: &[SparePart],
        orders: &[PurchaseOrder],
        requests: &[MaintenanceRequest],
        suppliers: &[Supplier],
    ) -> Self {
        Self {
            stats: DashboardStats::compute(parts, orders, requests, suppliers),
            recent_orders: most_recent(orders, RECENT_LIMIT),
            low_stock: low_stock_parts(parts, RECENT_LIMIT),
            open_requests: open_requests(requests, RECENT_LIMIT),
        }
    }
}

pub async fn fetch_overview(backend: &dyn Backend) -> Result<Overview, AppError> {
    let parts = a001_spare_part::api::fetch_spare_parts(backend).await?;
    let orders = a003_purchase_order::api::fetch_purchase_orders(backend).await?;
    let requests = a004_maintenance_request::api::fetch_maintenance_requests(backend).await?;
    let suppliers = a002_supplier::api::fetch_suppliers(backend).await?;
    Ok(Overview::build(&parts, &orders, &requests, &suppliers))
}
