use contracts::domain::a002_supplier::Supplier;

use crate::shared::backend::{select_as, tables, Backend};
use crate::shared::error::AppError;

pub async fn fetch_suppliers(backend: &dyn Backend) -> Result<Vec<Supplier>, AppError> {
    select_as(backend, tables::SUPPLIERS, &[]).await
}
