//! Startup fetch and refresh
//!
//! All five tables are read concurrently. Products and promotions fall
//! back to the built-in catalog when their read fails or comes back empty;
//! the other caches keep what they already hold.

use super::AppSession;
use crate::catalog::{
    Catalog, RemoteRecord, decode_dashboard, decode_records, default_products, default_promotions,
};
use crate::core::Config;
use lounge_client::{ClientResult, Query, Record, RecordStore, SortDirection, Table};
use shared::models::DASHBOARD_CONFIG_ID;
use std::sync::Arc;

/// Outcome of reading one table
enum Fetched<T> {
    Rows(Vec<T>),
    Empty,
    Failed,
}

impl<T: RemoteRecord> Fetched<T> {
    fn from_result(table: Table, result: ClientResult<Vec<Record>>) -> Self {
        match result {
            Ok(records) => {
                let rows = decode_records::<T>(records);
                if rows.is_empty() {
                    Fetched::Empty
                } else {
                    Fetched::Rows(rows)
                }
            }
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "Fetch failed");
                Fetched::Failed
            }
        }
    }
}

impl AppSession {
    /// Session with every cache loaded from the store
    pub async fn bootstrap(store: Arc<dyn RecordStore>, config: Config) -> Self {
        let mut session = Self::new(store, config);
        session.refresh().await;
        session
    }

    /// Re-read every table and replace the caches
    pub async fn refresh(&mut self) {
        let store = self.store.as_ref();
        let all = Query::all();
        let newest_first = Query::all().order_by("created_at", SortDirection::Descending);
        let dashboard = Query::all().eq("id", DASHBOARD_CONFIG_ID).limit(1);

        let (products, promotions, orders, users, dashboard) = tokio::join!(
            store.select(Table::Products, &all),
            store.select(Table::Promotions, &all),
            store.select(Table::Orders, &newest_first),
            store.select(Table::Users, &all),
            store.select(Table::DashboardConfig, &dashboard),
        );

        let mut degraded = false;

        self.catalog.products = match Fetched::from_result(Table::Products, products) {
            Fetched::Rows(rows) => rows,
            Fetched::Empty => default_products(),
            Fetched::Failed => {
                degraded = true;
                default_products()
            }
        };

        self.catalog.promotions = match Fetched::from_result(Table::Promotions, promotions) {
            Fetched::Rows(rows) => rows,
            Fetched::Empty => default_promotions(),
            Fetched::Failed => {
                degraded = true;
                default_promotions()
            }
        };

        match Fetched::from_result(Table::Orders, orders) {
            Fetched::Rows(rows) => self.orders = rows,
            Fetched::Empty => self.orders.clear(),
            Fetched::Failed => degraded = true,
        }

        match Fetched::from_result(Table::Users, users) {
            Fetched::Rows(rows) => self.users = rows,
            Fetched::Empty => self.users.clear(),
            Fetched::Failed => degraded = true,
        }

        match dashboard {
            Ok(records) => {
                if let Some(config) = decode_dashboard(records) {
                    self.dashboard = config;
                }
            }
            Err(e) => {
                tracing::warn!(table = %Table::DashboardConfig, error = %e, "Fetch failed");
                degraded = true;
            }
        }

        // Categories are never fetched
        if self.catalog.categories.is_empty() {
            self.catalog.categories = Catalog::defaults().categories;
        }

        self.degraded = degraded;
        if degraded {
            tracing::warn!("Running in degraded mode with built-in data");
        }
        tracing::info!(
            products = self.catalog.products.len(),
            promotions = self.catalog.promotions.len(),
            orders = self.orders.len(),
            users = self.users.len(),
            degraded,
            "Session data loaded"
        );
    }
}
