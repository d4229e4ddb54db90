use serde::{Deserialize, Serialize};

use crate::enums::OrderStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub part_number: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub order_number: String,
    pub supplier_name: String,
    pub supplier_contact: String,
    pub status: OrderStatus,
    pub total_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub order_date: String,
    pub expected_delivery_date: String,
    #[serde(default)]
    pub actual_delivery_date: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl PurchaseOrder {
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.order_number.to_lowercase().contains(&term)
            || self.supplier_name.to_lowercase().contains(&term)
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub search: String,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn apply<'a>(&self, orders: &'a [PurchaseOrder]) -> Vec<&'a PurchaseOrder> {
        orders
            .iter()
            .filter(|o| o.matches_search(&self.search))
            .filter(|o| self.status.map_or(true, |st| o.status == st))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderSummary {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total_value: f64,
}

impl OrderSummary {
    pub fn compute(orders: &[PurchaseOrder]) -> Self {
        Self {
            total: orders.len(),
            in_progress: orders.iter().filter(|o| o.status.is_in_progress()).count(),
            completed: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .count(),
            total_value: orders.iter().map(|o| o.total_amount).sum(),
        }
    }
}

/// Statuses present in the list, first-seen order
pub fn statuses(orders: &[PurchaseOrder]) -> Vec<OrderStatus> {
    let mut out = Vec::new();
    for order in orders {
        if !out.contains(&order.status) {
            out.push(order.status);
        }
    }
    out
}

/// Most recent orders first, by ISO order date
pub fn most_recent(orders: &[PurchaseOrder], limit: usize) -> Vec<PurchaseOrder> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn test_summary_counts_in_progress_orders() {
        let summary = OrderSummary::compute(&demo::purchase_orders());
        assert_eq!(summary.total, 4);
        // pending_approval + shipped
        assert_eq!(summary.in_progress, 2);
        assert_eq!(summary.completed, 1);
        assert!((summary.total_value - 52_941.5).abs() < 1e-6);
    }

    #[test]
    fn test_search_matches_supplier_name() {
        let orders = demo::purchase_orders();
        let filter = OrderFilter {
            search: "mecha".into(),
            status: None,
        };
        let hits = filter.apply(&orders);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, OrderStatus::SentToSupplier);
    }

    #[test]
    fn test_most_recent_sorts_descending() {
        let recent = most_recent(&demo::purchase_orders(), 2);
        let numbers: Vec<_> = recent.iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["PO-2024-004", "PO-2024-001"]);
    }

    #[test]
    fn test_line_totals() {
        let order = &demo::purchase_orders()[0];
        assert_eq!(order.items[0].line_total(), 910.0);
        assert_eq!(order.item_count(), 120);
    }
}
