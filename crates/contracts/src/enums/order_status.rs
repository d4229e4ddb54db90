use serde::{Deserialize, Serialize};

/// Lifecycle of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    PendingApproval,
    Approved,
    /// Legacy rows use "shipped" for orders already handed to the supplier.
    #[serde(alias = "shipped")]
    SentToSupplier,
    PartiallyReceived,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::PendingApproval => "pending_approval",
            OrderStatus::Approved => "approved",
            OrderStatus::SentToSupplier => "sent_to_supplier",
            OrderStatus::PartiallyReceived => "partially_received",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "Brouillon",
            OrderStatus::PendingApproval => "En attente",
            OrderStatus::Approved => "Approuvée",
            OrderStatus::SentToSupplier => "Expédiée",
            OrderStatus::PartiallyReceived => "Reçue partiellement",
            OrderStatus::Completed => "Terminée",
            OrderStatus::Cancelled => "Annulée",
        }
    }

    /// Orders still moving through approval or delivery.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            OrderStatus::PendingApproval | OrderStatus::Approved | OrderStatus::SentToSupplier
        )
    }

    pub fn all() -> Vec<OrderStatus> {
        vec![
            OrderStatus::Draft,
            OrderStatus::PendingApproval,
            OrderStatus::Approved,
            OrderStatus::SentToSupplier,
            OrderStatus::PartiallyReceived,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "draft" => Some(OrderStatus::Draft),
            "pending_approval" => Some(OrderStatus::PendingApproval),
            "approved" => Some(OrderStatus::Approved),
            "sent_to_supplier" | "shipped" => Some(OrderStatus::SentToSupplier),
            "partially_received" => Some(OrderStatus::PartiallyReceived),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_alias_maps_to_sent_to_supplier() {
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::SentToSupplier);
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"sent_to_supplier\""
        );
        assert_eq!(OrderStatus::from_code("shipped"), Some(OrderStatus::SentToSupplier));
    }

    #[test]
    fn test_in_progress_set() {
        let in_progress: Vec<_> = OrderStatus::all()
            .into_iter()
            .filter(OrderStatus::is_in_progress)
            .collect();
        assert_eq!(
            in_progress,
            vec![
                OrderStatus::PendingApproval,
                OrderStatus::Approved,
                OrderStatus::SentToSupplier
            ]
        );
    }
}
