pub mod global_context;
pub mod left;
pub mod top_header;

use leptos::prelude::*;

use crate::dashboards::OverviewDashboard;
use crate::domain::a001_spare_part::ui::SparePartList;
use crate::domain::a002_supplier::ui::SupplierList;
use crate::domain::a003_purchase_order::ui::PurchaseOrderList;
use crate::domain::a004_maintenance_request::ui::MaintenanceRequestList;
use crate::system::pages::SettingsPage;
use global_context::{use_global_context, Page};
use left::Sidebar;
use top_header::TopHeader;

/// Authenticated application frame.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_global_context();
    // Setting the same page again must not remount it
    let page = Memo::new(move |_| ctx.page.get());

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Sidebar />
                <main class="app-main">
                    {move || match page.get() {
                        Page::Dashboard => view! { <OverviewDashboard /> }.into_any(),
                        Page::SpareParts => view! { <SparePartList /> }.into_any(),
                        Page::Orders => view! { <PurchaseOrderList /> }.into_any(),
                        Page::Maintenance => view! { <MaintenanceRequestList /> }.into_any(),
                        Page::Suppliers => view! { <SupplierList /> }.into_any(),
                        Page::Settings => view! { <SettingsPage /> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}
