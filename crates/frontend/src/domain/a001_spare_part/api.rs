use contracts::domain::a001_spare_part::{SparePart, SparePartDto};
use uuid::Uuid;

use crate::shared::backend::{insert_as, select_as, tables, Backend};
use crate::shared::error::AppError;

pub async fn fetch_spare_parts(backend: &dyn Backend) -> Result<Vec<SparePart>, AppError> {
    select_as(backend, tables::SPARE_PARTS, &[]).await
}

/// Validates the form, then inserts the part under a new id
pub async fn create_spare_part(backend: &dyn Backend, dto: SparePartDto) -> Result<SparePart, AppError> {
    dto.validate().map_err(AppError::Validation)?;
    let part = dto.into_part(Uuid::new_v4().to_string());
    insert_as(backend, tables::SPARE_PARTS, &part).await?;
    log::info!("spare part {} created", part.part_number);
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::backend::DemoBackend;
    use contracts::demo;

    fn dto() -> SparePartDto {
        SparePartDto {
            part_number: " SKF-6205 ".into(),
            name: "Roulement 6205".into(),
            category: "Roulements".into(),
            current_stock: 4,
            minimum_stock: 10,
            maximum_stock: 40,
            unit_price: 12.5,
            ..SparePartDto::default()
        }
    }

    #[tokio::test]
    async fn test_created_part_is_listed() {
        let backend = DemoBackend::seeded();
        let part = create_spare_part(&backend, dto()).await.unwrap();
        assert_eq!(part.part_number, "SKF-6205");

        let parts = fetch_spare_parts(&backend).await.unwrap();
        assert_eq!(parts.len(), demo::spare_parts().len() + 1);
        assert!(parts.iter().any(|p| p.id == part.id));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let backend = DemoBackend::new();
        let err = create_spare_part(
            &backend,
            SparePartDto {
                name: String::new(),
                ..dto()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(fetch_spare_parts(&backend).await.unwrap().is_empty());
    }
}
