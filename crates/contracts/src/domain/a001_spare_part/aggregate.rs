use serde::{Deserialize, Serialize};

use crate::enums::CriticalityLevel;

// ============================================================================
// Aggregate Root
// ============================================================================

/// Spare part kept in the warehouse inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePart {
    pub id: String,
    pub part_number: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub manufacturer: String,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub maximum_stock: u32,
    pub unit_price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub location: String,
    pub criticality: CriticalityLevel,
    #[serde(default)]
    pub last_order_date: Option<String>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl SparePart {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.minimum_stock)
    }

    /// Value of what is currently on the shelf
    pub fn stock_value(&self) -> f64 {
        self.current_stock as f64 * self.unit_price
    }

    pub fn is_below_minimum(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }

    /// Case-insensitive match on name or part number
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.part_number.to_lowercase().contains(&term)
    }
}

// ============================================================================
// Stock status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Critical,
    Low,
    Ok,
}

impl StockStatus {
    /// Empty shelf first, then at most half the minimum, then at most the minimum.
    pub fn classify(current: u32, minimum: u32) -> Self {
        if current == 0 {
            StockStatus::OutOfStock
        } else if (current as f64) <= minimum as f64 * 0.5 {
            StockStatus::Critical
        } else if current <= minimum {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Rupture",
            StockStatus::Critical => "Critique",
            StockStatus::Low => "Faible",
            StockStatus::Ok => "OK",
        }
    }
}

// ============================================================================
// Create DTO
// ============================================================================

/// Form payload for a new spare part
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparePartDto {
    pub part_number: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub manufacturer: String,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub maximum_stock: u32,
    pub unit_price: f64,
    pub location: String,
    pub criticality: Option<CriticalityLevel>,
}

impl SparePartDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.part_number.trim().is_empty() {
            return Err("La référence est obligatoire".into());
        }
        if self.name.trim().is_empty() {
            return Err("Le nom est obligatoire".into());
        }
        if self.category.trim().is_empty() {
            return Err("La catégorie est obligatoire".into());
        }
        if self.unit_price < 0.0 {
            return Err("Le prix unitaire ne peut pas être négatif".into());
        }
        if self.maximum_stock > 0 && self.minimum_stock > self.maximum_stock {
            return Err("Le stock minimum dépasse le stock maximum".into());
        }
        Ok(())
    }

    /// Builds the row to insert, with a fresh id
    pub fn into_part(self, id: String) -> SparePart {
        SparePart {
            id,
            part_number: self.part_number.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description,
            category: self.category.trim().to_string(),
            manufacturer: self.manufacturer.trim().to_string(),
            current_stock: self.current_stock,
            minimum_stock: self.minimum_stock,
            maximum_stock: self.maximum_stock,
            unit_price: self.unit_price,
            currency: default_currency(),
            location: self.location.trim().to_string(),
            criticality: self.criticality.unwrap_or(CriticalityLevel::Medium),
            last_order_date: None,
        }
    }
}

// ============================================================================
// Listing helpers
// ============================================================================

/// Summary cards of the spare parts page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventorySummary {
    pub total: usize,
    pub low_stock: usize,
    pub in_stock: usize,
    pub stock_value: f64,
}

impl InventorySummary {
    pub fn compute(parts: &[SparePart]) -> Self {
        let low_stock = parts.iter().filter(|p| p.is_below_minimum()).count();
        Self {
            total: parts.len(),
            low_stock,
            in_stock: parts.len() - low_stock,
            stock_value: parts.iter().map(SparePart::stock_value).sum(),
        }
    }
}

/// Distinct categories in first-seen order
pub fn categories(parts: &[SparePart]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in parts {
        if !out.contains(&part.category) {
            out.push(part.category.clone());
        }
    }
    out
}

/// `category = None` means every category
pub fn filter_parts<'a>(
    parts: &'a [SparePart],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a SparePart> {
    parts
        .iter()
        .filter(|p| p.matches_search(search))
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(StockStatus::classify(0, 10), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(5, 10), StockStatus::Critical);
        assert_eq!(StockStatus::classify(6, 10), StockStatus::Low);
        assert_eq!(StockStatus::classify(10, 10), StockStatus::Low);
        assert_eq!(StockStatus::classify(11, 10), StockStatus::Ok);
        // minimum of zero: any stock is fine
        assert_eq!(StockStatus::classify(1, 0), StockStatus::Ok);
    }

    #[test]
    fn test_summary_over_demo_inventory() {
        let parts = demo::spare_parts();
        let summary = InventorySummary::compute(&parts);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.low_stock, 3);
        assert_eq!(summary.in_stock, 1);
        let expected = 2.0 * 45.50 + 15.0 * 8.75 + 125.0 + 8.0 * 67.20;
        assert!((summary.stock_value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_filter_by_search_and_category() {
        let parts = demo::spare_parts();
        let hits = filter_parts(&parts, "skf", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].part_number, "SKF-6205");

        let joints = filter_parts(&parts, "", Some("Joints"));
        assert_eq!(joints.len(), 1);
        assert_eq!(joints[0].name, "Joint torique NBR 50x3");

        assert!(filter_parts(&parts, "skf", Some("Joints")).is_empty());
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let parts = demo::spare_parts();
        assert_eq!(
            categories(&parts),
            vec!["Roulements", "Joints", "Courroies", "Filtres"]
        );
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = SparePartDto {
            part_number: "ABC-1".into(),
            name: "Roulement".into(),
            category: "Roulements".into(),
            minimum_stock: 5,
            maximum_stock: 20,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());

        dto.minimum_stock = 30;
        assert!(dto.validate().is_err());

        dto.minimum_stock = 5;
        dto.name = "  ".into();
        assert_eq!(dto.validate().unwrap_err(), "Le nom est obligatoire");
    }

    #[test]
    fn test_dto_defaults_to_medium_criticality() {
        let part = SparePartDto {
            part_number: " X-1 ".into(),
            name: "Courroie".into(),
            category: "Courroies".into(),
            ..Default::default()
        }
        .into_part("P900".into());
        assert_eq!(part.part_number, "X-1");
        assert_eq!(part.criticality, CriticalityLevel::Medium);
        assert_eq!(part.currency, "EUR");
    }
}
