use contracts::domain::a003_purchase_order::PurchaseOrder;

use crate::shared::backend::{select_as, tables, Backend};
use crate::shared::error::AppError;

pub async fn fetch_purchase_orders(backend: &dyn Backend) -> Result<Vec<PurchaseOrder>, AppError> {
    select_as(backend, tables::PURCHASE_ORDERS, &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::backend::DemoBackend;
    use contracts::demo;

    #[tokio::test]
    async fn test_orders_decode_from_demo_rows() {
        let orders = fetch_purchase_orders(&DemoBackend::seeded()).await.unwrap();
        assert_eq!(orders, demo::purchase_orders());
    }
}
