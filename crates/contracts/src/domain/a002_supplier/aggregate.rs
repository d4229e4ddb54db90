use serde::{Deserialize, Serialize};

use crate::enums::SupplierStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
}

impl Address {
    /// "69000 Lyon, France"
    pub fn short(&self) -> String {
        format!("{} {}, {}", self.postal_code, self.city, self.country)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: Address,
    /// 0 to 5, one decimal
    pub rating: f64,
    pub lead_time_days: u32,
    pub minimum_order_value: f64,
    pub currency: String,
    pub payment_terms: String,
    pub is_preferred: bool,
    pub total_orders: u32,
    pub total_value: f64,
    #[serde(default)]
    pub last_order_date: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub status: SupplierStatus,
}

impl Supplier {
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.contact_email.to_lowercase().contains(&term)
    }

    pub fn stars(&self) -> RatingStars {
        RatingStars::from_rating(self.rating)
    }
}

/// Star breakdown used by the rating widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingStars {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl RatingStars {
    pub fn from_rating(rating: f64) -> Self {
        let rating = rating.clamp(0.0, 5.0);
        let full = rating.floor() as u8;
        let half = rating.fract() != 0.0;
        let empty = 5 - full - u8::from(half);
        Self { full, half, empty }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierFilter {
    pub search: String,
    pub status: Option<SupplierStatus>,
    pub preferred_only: bool,
}

impl SupplierFilter {
    pub fn apply<'a>(&self, suppliers: &'a [Supplier]) -> Vec<&'a Supplier> {
        suppliers
            .iter()
            .filter(|s| s.matches_search(&self.search))
            .filter(|s| self.status.map_or(true, |st| s.status == st))
            .filter(|s| !self.preferred_only || s.is_preferred)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupplierSummary {
    pub active: usize,
    pub preferred: usize,
    pub total_value: f64,
    pub average_rating: f64,
}

impl SupplierSummary {
    pub fn compute(suppliers: &[Supplier]) -> Self {
        let average_rating = if suppliers.is_empty() {
            0.0
        } else {
            suppliers.iter().map(|s| s.rating).sum::<f64>() / suppliers.len() as f64
        };
        Self {
            active: suppliers
                .iter()
                .filter(|s| s.status == SupplierStatus::Active)
                .count(),
            preferred: suppliers.iter().filter(|s| s.is_preferred).count(),
            total_value: suppliers.iter().map(|s| s.total_value).sum(),
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn test_stars_split() {
        assert_eq!(
            RatingStars::from_rating(4.8),
            RatingStars { full: 4, half: true, empty: 0 }
        );
        assert_eq!(
            RatingStars::from_rating(3.0),
            RatingStars { full: 3, half: false, empty: 2 }
        );
        assert_eq!(
            RatingStars::from_rating(7.0),
            RatingStars { full: 5, half: false, empty: 0 }
        );
    }

    #[test]
    fn test_summary_over_demo_suppliers() {
        let summary = SupplierSummary::compute(&demo::suppliers());
        assert_eq!(summary.active, 3);
        assert_eq!(summary.preferred, 2);
        assert_eq!(summary.total_value, 413_500.0);
        assert!((summary.average_rating - 4.375).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_has_zero_average() {
        assert_eq!(SupplierSummary::compute(&[]).average_rating, 0.0);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let suppliers = demo::suppliers();
        let filter = SupplierFilter {
            preferred_only: true,
            ..Default::default()
        };
        let names: Vec<_> = filter.apply(&suppliers).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["TechParts SA", "MechaComponents"]);

        let filter = SupplierFilter {
            search: "HYDRAULIC".into(),
            status: Some(SupplierStatus::Active),
            preferred_only: false,
        };
        assert!(filter.apply(&suppliers).is_empty());
    }
}
