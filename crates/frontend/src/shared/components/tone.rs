use contracts::domain::a001_spare_part::StockStatus;
use contracts::enums::{CriticalityLevel, MaintenanceStatus, OrderStatus, Priority, SupplierStatus};
use leptos::prelude::*;
use thaw::*;

/// Visual severity shared by badges and stat cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn badge_color(self) -> BadgeColor {
        match self {
            Tone::Neutral => BadgeColor::Subtle,
            Tone::Info => BadgeColor::Informative,
            Tone::Success => BadgeColor::Success,
            Tone::Warning => BadgeColor::Warning,
            Tone::Danger => BadgeColor::Danger,
        }
    }

    pub fn css_modifier(self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
        }
    }
}

impl From<StockStatus> for Tone {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::OutOfStock | StockStatus::Critical => Tone::Danger,
            StockStatus::Low => Tone::Warning,
            StockStatus::Ok => Tone::Success,
        }
    }
}

impl From<CriticalityLevel> for Tone {
    fn from(level: CriticalityLevel) -> Self {
        match level {
            CriticalityLevel::Low => Tone::Neutral,
            CriticalityLevel::Medium => Tone::Info,
            CriticalityLevel::High => Tone::Warning,
            CriticalityLevel::Critical => Tone::Danger,
        }
    }
}

impl From<Priority> for Tone {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => Tone::Neutral,
            Priority::Medium => Tone::Info,
            Priority::High => Tone::Warning,
            Priority::Urgent => Tone::Danger,
        }
    }
}

impl From<OrderStatus> for Tone {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Draft => Tone::Neutral,
            OrderStatus::PendingApproval => Tone::Warning,
            OrderStatus::Approved | OrderStatus::SentToSupplier => Tone::Info,
            OrderStatus::PartiallyReceived => Tone::Info,
            OrderStatus::Completed => Tone::Success,
            OrderStatus::Cancelled => Tone::Danger,
        }
    }
}

impl From<MaintenanceStatus> for Tone {
    fn from(status: MaintenanceStatus) -> Self {
        match status {
            MaintenanceStatus::Pending => Tone::Warning,
            MaintenanceStatus::Approved
            | MaintenanceStatus::PartsOrdered
            | MaintenanceStatus::PartsAvailable
            | MaintenanceStatus::InProgress => Tone::Info,
            MaintenanceStatus::Completed => Tone::Success,
            MaintenanceStatus::Cancelled => Tone::Neutral,
        }
    }
}

impl From<SupplierStatus> for Tone {
    fn from(status: SupplierStatus) -> Self {
        match status {
            SupplierStatus::Active => Tone::Success,
            SupplierStatus::Inactive => Tone::Neutral,
            SupplierStatus::Pending => Tone::Warning,
        }
    }
}

#[component]
pub fn ToneBadge(#[prop(into)] tone: Tone, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=tone.badge_color()>
            {label}
        </Badge>
    }
}
