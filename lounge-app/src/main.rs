use chrono::Local;
use lounge_app::dashboard::next_raffle_date;
use lounge_app::{AppSession, print_banner, setup_environment};
use lounge_client::RestStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging) and configuration
    let config = setup_environment();

    print_banner();
    tracing::info!(backend = %config.backend_url, "Lounge starting...");
    if config.admin.is_none() {
        tracing::warn!("LOUNGE_ADMIN_PASSWORD not set, admin login disabled");
    }

    // 2. Backend store
    let store = RestStore::new(config.client_config())?;

    // 3. Session with every cache loaded
    let session = AppSession::bootstrap(Arc::new(store), config).await;

    let catalog = session.catalog();
    for category in &catalog.categories {
        tracing::info!(
            category = %category.name,
            products = catalog.products_in(&category.id).count(),
            "Category"
        );
    }
    tracing::info!(
        promotions = catalog.promotions.len(),
        discounts = catalog.discount_promotions().count(),
        degraded = session.is_degraded(),
        "Catalog ready"
    );
    tracing::info!(
        title = %session.dashboard().welcome_title,
        raffle = %next_raffle_date(Local::now().date_naive()),
        "Next monthly raffle"
    );

    Ok(())
}
