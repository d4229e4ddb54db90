//! Sample data backing the offline demo mode.

use crate::domain::a001_spare_part::SparePart;
use crate::domain::a002_supplier::{Address, Supplier};
use crate::domain::a003_purchase_order::{OrderItem, PurchaseOrder};
use crate::domain::a004_maintenance_request::{MaintenanceRequest, RequiredPart};
use crate::enums::{CriticalityLevel, MaintenanceStatus, OrderStatus, Priority, SupplierStatus};
use crate::system::users::{UserRole, UserRow};

pub const DEMO_USER_ID: &str = "00000000-0000-4000-8000-000000000001";
pub const DEMO_EMAIL: &str = "jean.dupont@sosmachine.pro";
pub const DEMO_PASSWORD: &str = "demo1234";

pub fn demo_user_row() -> UserRow {
    UserRow {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
        first_name: "Jean".to_string(),
        last_name: "Dupont".to_string(),
        company: "SOSMachine Industries".to_string(),
        role: UserRole::Manager,
        avatar: None,
        created_at: "2024-01-01T08:00:00.000Z".to_string(),
        updated_at: "2024-01-01T08:00:00.000Z".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn part(
    id: &str,
    part_number: &str,
    name: &str,
    category: &str,
    manufacturer: &str,
    (current_stock, minimum_stock, maximum_stock): (u32, u32, u32),
    unit_price: f64,
    location: &str,
    criticality: CriticalityLevel,
    last_order_date: &str,
) -> SparePart {
    SparePart {
        id: id.to_string(),
        part_number: part_number.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: category.to_string(),
        manufacturer: manufacturer.to_string(),
        current_stock,
        minimum_stock,
        maximum_stock,
        unit_price,
        currency: "EUR".to_string(),
        location: location.to_string(),
        criticality,
        last_order_date: Some(last_order_date.to_string()),
    }
}

pub fn spare_parts() -> Vec<SparePart> {
    vec![
        part(
            "P001",
            "SKF-6205",
            "Roulement SKF 6205",
            "Roulements",
            "SKF",
            (2, 10, 50),
            45.50,
            "A-12-03",
            CriticalityLevel::High,
            "2024-01-10",
        ),
        part(
            "P002",
            "NBR-50x3",
            "Joint torique NBR 50x3",
            "Joints",
            "Parker",
            (15, 20, 100),
            8.75,
            "B-05-12",
            CriticalityLevel::Medium,
            "2024-01-08",
        ),
        part(
            "P003",
            "HTD-8M-1600",
            "Courroie HTD 8M-1600",
            "Courroies",
            "Gates",
            (1, 5, 20),
            125.00,
            "C-08-01",
            CriticalityLevel::Critical,
            "2023-12-15",
        ),
        part(
            "P004",
            "FILTER-HF35",
            "Filtre hydraulique HF35",
            "Filtres",
            "Hydac",
            (8, 6, 30),
            67.20,
            "D-03-07",
            CriticalityLevel::Low,
            "2024-01-12",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn supplier(
    id: &str,
    name: &str,
    (contact_email, contact_phone): (&str, &str),
    (street, city, postal_code): (&str, &str, &str),
    rating: f64,
    lead_time_days: u32,
    minimum_order_value: f64,
    payment_terms: &str,
    is_preferred: bool,
    (total_orders, total_value): (u32, f64),
    last_order_date: &str,
    categories: &[&str],
    status: SupplierStatus,
) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: name.to_string(),
        contact_email: contact_email.to_string(),
        contact_phone: contact_phone.to_string(),
        address: Address {
            street: street.to_string(),
            city: city.to_string(),
            postal_code: postal_code.to_string(),
            country: "France".to_string(),
            region: None,
        },
        rating,
        lead_time_days,
        minimum_order_value,
        currency: "EUR".to_string(),
        payment_terms: payment_terms.to_string(),
        is_preferred,
        total_orders,
        total_value,
        last_order_date: Some(last_order_date.to_string()),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        status,
    }
}

pub fn suppliers() -> Vec<Supplier> {
    vec![
        supplier(
            "SUP-001",
            "TechParts SA",
            ("contact@techparts.fr", "+33 1 23 45 67 89"),
            ("123 Rue de l'Industrie", "Lyon", "69000"),
            4.8,
            3,
            500.0,
            "30 jours",
            true,
            (45, 125_000.0),
            "2024-01-15",
            &["Roulements", "Joints", "Filtres"],
            SupplierStatus::Active,
        ),
        supplier(
            "SUP-002",
            "Industrial Supply",
            ("orders@industrial-supply.com", "+33 4 56 78 90 12"),
            ("456 Avenue des Machines", "Marseille", "13000"),
            4.2,
            5,
            300.0,
            "45 jours",
            false,
            (28, 87_500.0),
            "2024-01-12",
            &["Courroies", "Moteurs", "Variateurs"],
            SupplierStatus::Active,
        ),
        supplier(
            "SUP-003",
            "MechaComponents",
            ("sales@mechacomponents.fr", "+33 2 34 56 78 90"),
            ("789 Boulevard Technique", "Nantes", "44000"),
            4.6,
            4,
            750.0,
            "30 jours",
            true,
            (32, 156_000.0),
            "2024-01-10",
            &["Hydraulique", "Pneumatique", "Automatisme"],
            SupplierStatus::Active,
        ),
        supplier(
            "SUP-004",
            "Hydraulic Pro",
            ("commandes@hydraulicpro.fr", "+33 5 67 89 01 23"),
            ("321 Rue Hydraulique", "Toulouse", "31000"),
            3.9,
            7,
            400.0,
            "60 jours",
            false,
            (15, 45_000.0),
            "2024-01-08",
            &["Hydraulique", "Joints"],
            SupplierStatus::Inactive,
        ),
    ]
}

fn item(part_number: &str, name: &str, quantity: u32, unit_price: f64) -> OrderItem {
    OrderItem {
        part_number: part_number.to_string(),
        name: name.to_string(),
        quantity,
        unit_price,
    }
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    order_number: &str,
    (supplier_name, supplier_contact): (&str, &str),
    status: OrderStatus,
    total_amount: f64,
    (order_date, expected_delivery_date): (&str, &str),
    actual_delivery_date: Option<&str>,
    items: Vec<OrderItem>,
) -> PurchaseOrder {
    PurchaseOrder {
        id: id.to_string(),
        order_number: order_number.to_string(),
        supplier_name: supplier_name.to_string(),
        supplier_contact: supplier_contact.to_string(),
        status,
        total_amount,
        currency: "EUR".to_string(),
        order_date: order_date.to_string(),
        expected_delivery_date: expected_delivery_date.to_string(),
        actual_delivery_date: actual_delivery_date.map(str::to_string),
        items,
    }
}

pub fn purchase_orders() -> Vec<PurchaseOrder> {
    vec![
        order(
            "CMD-001",
            "PO-2024-001",
            ("TechParts SA", "contact@techparts.fr"),
            OrderStatus::Completed,
            15_420.50,
            ("2024-01-15", "2024-01-22"),
            Some("2024-01-20"),
            vec![
                item("SKF-6205", "Roulement SKF 6205", 20, 45.50),
                item("NBR-50x3", "Joint torique NBR 50x3", 100, 8.75),
            ],
        ),
        order(
            "CMD-002",
            "PO-2024-002",
            ("Industrial Supply", "orders@industrial-supply.com"),
            OrderStatus::PendingApproval,
            8_750.00,
            ("2024-01-14", "2024-01-28"),
            None,
            vec![item("HTD-8M-1600", "Courroie HTD 8M-1600", 10, 125.00)],
        ),
        order(
            "CMD-003",
            "PO-2024-003",
            ("MechaComponents", "sales@mechacomponents.fr"),
            OrderStatus::SentToSupplier,
            23_100.75,
            ("2024-01-13", "2024-01-25"),
            None,
            vec![item("FILTER-HF35", "Filtre hydraulique HF35", 50, 67.20)],
        ),
        order(
            "CMD-004",
            "PO-2024-004",
            ("Hydraulic Pro", "commandes@hydraulicpro.fr"),
            OrderStatus::Draft,
            5_670.25,
            ("2024-01-16", "2024-01-30"),
            None,
            vec![item("SEAL-V320", "Joint V-Ring 320", 25, 15.80)],
        ),
    ]
}

fn required(part_number: &str, name: &str, quantity: u32, available: bool) -> RequiredPart {
    RequiredPart {
        part_number: part_number.to_string(),
        name: name.to_string(),
        quantity,
        available,
    }
}

pub fn maintenance_requests() -> Vec<MaintenanceRequest> {
    vec![
        MaintenanceRequest {
            id: "MNT-001".into(),
            title: "Remplacement roulement pompe P-101".into(),
            equipment_name: "Pompe centrifuge P-101".into(),
            equipment_location: "Atelier A - Zone 1".into(),
            priority: Priority::Urgent,
            status: MaintenanceStatus::InProgress,
            requested_by: "Jean Dupont".into(),
            assigned_to: Some("Marie Martin".into()),
            created_at: "2024-01-15T08:30:00Z".into(),
            scheduled_date: Some("2024-01-16T14:00:00Z".into()),
            estimated_duration_hours: 4,
            description: "Bruit anormal détecté sur la pompe P-101. Remplacement du roulement principal nécessaire.".into(),
            required_parts: vec![
                required("SKF-6205", "Roulement SKF 6205", 2, true),
                required("SEAL-V320", "Joint V-Ring 320", 1, false),
            ],
        },
        MaintenanceRequest {
            id: "MNT-002".into(),
            title: "Maintenance préventive convoyeur C-205".into(),
            equipment_name: "Convoyeur à bande C-205".into(),
            equipment_location: "Atelier B - Zone 3".into(),
            priority: Priority::Medium,
            status: MaintenanceStatus::Pending,
            requested_by: "Pierre Durand".into(),
            assigned_to: None,
            created_at: "2024-01-14T10:15:00Z".into(),
            scheduled_date: Some("2024-01-18T09:00:00Z".into()),
            estimated_duration_hours: 6,
            description: "Maintenance préventive trimestrielle du convoyeur C-205.".into(),
            required_parts: vec![
                required("HTD-8M-1600", "Courroie HTD 8M-1600", 1, true),
                required("FILTER-HF35", "Filtre hydraulique HF35", 2, true),
            ],
        },
        MaintenanceRequest {
            id: "MNT-003".into(),
            title: "Réparation vérin hydraulique V-450".into(),
            equipment_name: "Vérin hydraulique V-450".into(),
            equipment_location: "Atelier C - Presse 2".into(),
            priority: Priority::High,
            status: MaintenanceStatus::PartsOrdered,
            requested_by: "Sophie Leroy".into(),
            assigned_to: Some("Thomas Bernard".into()),
            created_at: "2024-01-13T16:45:00Z".into(),
            scheduled_date: Some("2024-01-20T08:00:00Z".into()),
            estimated_duration_hours: 3,
            description: "Fuite importante sur le vérin V-450. Remplacement des joints nécessaire.".into(),
            required_parts: vec![required("NBR-50x3", "Joint torique NBR 50x3", 4, false)],
        },
        MaintenanceRequest {
            id: "MNT-004".into(),
            title: "Calibrage capteur température T-102".into(),
            equipment_name: "Capteur température T-102".into(),
            equipment_location: "Four F-102".into(),
            priority: Priority::Low,
            status: MaintenanceStatus::Completed,
            requested_by: "Michel Rousseau".into(),
            assigned_to: Some("Marie Martin".into()),
            created_at: "2024-01-12T11:20:00Z".into(),
            scheduled_date: Some("2024-01-15T13:30:00Z".into()),
            estimated_duration_hours: 1,
            description: "Calibrage annuel du capteur de température T-102.".into(),
            required_parts: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_serialize_as_rows() {
        let rows = serde_json::to_value(purchase_orders()).unwrap();
        assert_eq!(rows[2]["status"], "sent_to_supplier");
        assert_eq!(rows[0]["items"][1]["quantity"], 100);

        let parts: Vec<SparePart> =
            serde_json::from_value(serde_json::to_value(spare_parts()).unwrap()).unwrap();
        assert_eq!(parts, spare_parts());
    }

    #[test]
    fn test_demo_account_row_matches_constants() {
        let row = demo_user_row();
        assert_eq!(row.id, DEMO_USER_ID);
        assert_eq!(row.email, DEMO_EMAIL);
    }
}
