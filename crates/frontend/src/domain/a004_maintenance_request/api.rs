use contracts::domain::a004_maintenance_request::MaintenanceRequest;

use crate::shared::backend::{select_as, tables, Backend};
use crate::shared::error::AppError;

pub async fn fetch_maintenance_requests(backend: &dyn Backend) -> Result<Vec<MaintenanceRequest>, AppError> {
    select_as(backend, tables::MAINTENANCE_REQUESTS, &[]).await
}
