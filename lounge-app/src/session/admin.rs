//! Admin operations
//!
//! Every write goes to the store first; the matching cache is patched only
//! after the store reports success.

use super::AppSession;
use crate::admin::{SalesStats, validate_product_draft, validate_promotion_draft};
use crate::catalog::to_record;
use crate::core::StoreResultExt;
use lounge_client::Table;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    DashboardConfig, DashboardConfigRecord, Order, Product, ProductDraft, Promotion,
    PromotionDraft, User,
};
use shared::util::prefixed_id;

impl AppSession {
    // ========== Products ==========

    pub async fn add_product(&mut self, draft: ProductDraft) -> AppResult<&Product> {
        self.require_admin()?;
        validate_product_draft(&draft, &self.catalog.categories)?;

        let product = draft.into_product(prefixed_id("prod"));
        self.store
            .insert(Table::Products, to_record(&product)?)
            .await
            .on_write("add product")?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product added");
        let id = product.id.clone();
        self.catalog.upsert_product(product);
        self.catalog
            .find_product(&id)
            .ok_or_else(|| AppError::internal("product missing after insert"))
    }

    pub async fn update_product(&mut self, id: &str, draft: ProductDraft) -> AppResult<&Product> {
        self.require_admin()?;
        if self.catalog.find_product(id).is_none() {
            return Err(AppError::new(ErrorCode::ProductNotFound).with_detail("id", id));
        }
        validate_product_draft(&draft, &self.catalog.categories)?;

        let product = draft.into_product(id);
        self.store
            .update(Table::Products, id, to_record(&product)?)
            .await
            .on_write("update product")?;

        tracing::info!(product_id = %id, "Product updated");
        self.catalog.upsert_product(product);
        self.catalog
            .find_product(id)
            .ok_or_else(|| AppError::internal("product missing after update"))
    }

    pub async fn delete_product(&mut self, id: &str) -> AppResult<()> {
        self.require_admin()?;
        self.store
            .delete(Table::Products, id)
            .await
            .on_write("delete product")?;

        self.catalog.remove_product(id);
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    // ========== Promotions ==========

    pub async fn add_promotion(&mut self, draft: PromotionDraft) -> AppResult<&Promotion> {
        self.require_admin()?;
        validate_promotion_draft(&draft)?;

        let promotion = draft.into_promotion(prefixed_id("promo"));
        self.store
            .insert(Table::Promotions, to_record(&promotion)?)
            .await
            .on_write("add promotion")?;

        tracing::info!(promotion_id = %promotion.id, title = %promotion.title, "Promotion added");
        let id = promotion.id.clone();
        self.catalog.upsert_promotion(promotion);
        self.catalog
            .find_promotion(&id)
            .ok_or_else(|| AppError::internal("promotion missing after insert"))
    }

    pub async fn update_promotion(
        &mut self,
        id: &str,
        draft: PromotionDraft,
    ) -> AppResult<&Promotion> {
        self.require_admin()?;
        if self.catalog.find_promotion(id).is_none() {
            return Err(AppError::new(ErrorCode::PromotionNotFound).with_detail("id", id));
        }
        validate_promotion_draft(&draft)?;

        let promotion = draft.into_promotion(id);
        self.store
            .update(Table::Promotions, id, to_record(&promotion)?)
            .await
            .on_write("update promotion")?;

        tracing::info!(promotion_id = %id, "Promotion updated");
        self.catalog.upsert_promotion(promotion);
        self.catalog
            .find_promotion(id)
            .ok_or_else(|| AppError::internal("promotion missing after update"))
    }

    pub async fn delete_promotion(&mut self, id: &str) -> AppResult<()> {
        self.require_admin()?;
        self.store
            .delete(Table::Promotions, id)
            .await
            .on_write("delete promotion")?;

        self.catalog.remove_promotion(id);
        tracing::info!(promotion_id = %id, "Promotion deleted");
        Ok(())
    }

    // ========== Dashboard ==========

    pub async fn update_dashboard(&mut self, config: DashboardConfig) -> AppResult<()> {
        self.require_admin()?;
        let record = to_record(&DashboardConfigRecord::main(config.clone()))?;
        self.store
            .upsert(Table::DashboardConfig, record)
            .await
            .on_write("update dashboard config")?;

        self.dashboard = config;
        tracing::info!("Dashboard config updated");
        Ok(())
    }

    // ========== Orders & users ==========

    /// Hard delete
    pub async fn delete_order(&mut self, id: &str) -> AppResult<()> {
        self.require_admin()?;
        self.store
            .delete(Table::Orders, id)
            .await
            .on_write("delete order")?;

        self.orders.retain(|o| o.id != id);
        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }

    /// Hard delete
    pub async fn delete_user(&mut self, id: &str) -> AppResult<()> {
        self.require_admin()?;
        self.store
            .delete(Table::Users, id)
            .await
            .on_write("delete user")?;

        self.users.retain(|u| u.id != id);
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Every cached order, newest first
    pub fn all_orders(&self) -> AppResult<&[Order]> {
        self.require_admin()?;
        Ok(&self.orders)
    }

    pub fn all_users(&self) -> AppResult<&[User]> {
        self.require_admin()?;
        Ok(&self.users)
    }

    pub fn sales_stats(&self) -> AppResult<SalesStats> {
        self.require_admin()?;
        Ok(SalesStats::compute(&self.orders, &self.users))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use lounge_client::MemoryStore;
    use std::sync::Arc;

    async fn admin_session(store: Arc<MemoryStore>) -> AppSession {
        let config = Config::default().with_admin("Paul Valerio Naar", "pw");
        let mut session = AppSession::bootstrap(store, config).await;
        session.login("Paul Valerio Naar", "pw").await.unwrap();
        session
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Margarita".into(),
            description: "Tequila y limón".into(),
            price: 300.0,
            image_url: "https://example.com/margarita.jpg".into(),
            category_id: "cat-4".into(),
            is_combo: false,
            is_eligible_for_reward: false,
        }
    }

    #[tokio::test]
    async fn test_add_update_delete_product() {
        let store = Arc::new(MemoryStore::new());
        let mut session = admin_session(store.clone()).await;

        let id = session.add_product(draft()).await.unwrap().id.clone();
        assert!(id.starts_with("prod-"));
        assert_eq!(session.products().last().unwrap().id, id);
        assert_eq!(store.len(Table::Products), 1);

        let mut changed = draft();
        changed.price = 350.0;
        session.update_product(&id, changed).await.unwrap();
        assert_eq!(session.catalog().find_product(&id).unwrap().price, 350.0);
        assert_eq!(store.get(Table::Products, &id).unwrap()["price"], 350.0);

        session.delete_product(&id).await.unwrap();
        assert!(session.catalog().find_product(&id).is_none());
        assert!(store.is_empty(Table::Products));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache() {
        let store = Arc::new(MemoryStore::new());
        let mut session = admin_session(store.clone()).await;
        store.fail_writes(Table::Products, true);

        let before = session.products().len();
        let err = session.add_product(draft()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);
        assert_eq!(session.products().len(), before);
    }

    #[tokio::test]
    async fn test_non_admin_refused() {
        let mut session = AppSession::new(Arc::new(MemoryStore::new()), Config::default());
        let err = session.add_product(draft()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        session
            .register(
                shared::models::NewUser {
                    full_name: "Maria".into(),
                    phone: "1".into(),
                },
                "abcd",
            )
            .await
            .unwrap();
        let err = session.sales_stats().unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
    }

    #[tokio::test]
    async fn test_update_dashboard_upserts_main_row() {
        let store = Arc::new(MemoryStore::new());
        let mut session = admin_session(store.clone()).await;
        let config = DashboardConfig {
            welcome_title: "Hola".into(),
            ..DashboardConfig::default()
        };
        session.update_dashboard(config).await.unwrap();
        session
            .update_dashboard(DashboardConfig {
                transfer_info: "Banco Popular".into(),
                ..DashboardConfig::default()
            })
            .await
            .unwrap();

        assert_eq!(store.len(Table::DashboardConfig), 1);
        let row = store.get(Table::DashboardConfig, "main").unwrap();
        assert_eq!(row["config"]["transferInfo"], "Banco Popular");
        assert_eq!(session.dashboard().transfer_info, "Banco Popular");
    }

    fn promo_draft(pct: Option<f64>, min: Option<f64>) -> PromotionDraft {
        PromotionDraft {
            title: "Noche de cocteles".into(),
            description: "Descuento en pedidos grandes".into(),
            image_url: "https://example.com/cocteles.jpg".into(),
            discount_percentage: pct,
            min_amount: min,
        }
    }

    #[tokio::test]
    async fn test_add_update_delete_promotion() {
        let store = Arc::new(MemoryStore::new());
        let mut session = admin_session(store.clone()).await;

        let id = session
            .add_promotion(promo_draft(Some(20.0), Some(100.0)))
            .await
            .unwrap()
            .id
            .clone();
        assert!(id.starts_with("promo-"));
        assert_eq!(session.catalog().promotions.last().unwrap().id, id);
        assert_eq!(store.get(Table::Promotions, &id).unwrap()["discountPercentage"], 20.0);

        session
            .update_promotion(&id, promo_draft(Some(15.0), Some(100.0)))
            .await
            .unwrap();
        assert_eq!(
            session.catalog().find_promotion(&id).unwrap().discount_percentage,
            Some(15.0)
        );

        session.delete_promotion(&id).await.unwrap();
        assert!(session.catalog().find_promotion(&id).is_none());
        assert!(store.is_empty(Table::Promotions));
    }

    #[tokio::test]
    async fn test_cleared_discount_survives_refresh() {
        let store = Arc::new(MemoryStore::new());
        let mut session = admin_session(store.clone()).await;
        let id = session
            .add_promotion(promo_draft(Some(20.0), Some(100.0)))
            .await
            .unwrap()
            .id
            .clone();

        session
            .update_promotion(&id, promo_draft(None, None))
            .await
            .unwrap();
        let row = store.get(Table::Promotions, &id).unwrap();
        assert!(row["discountPercentage"].is_null());
        assert!(row["minAmount"].is_null());

        session.refresh().await;
        let promotion = session.catalog().find_promotion(&id).unwrap();
        assert_eq!(promotion.discount_percentage, None);
        assert_eq!(promotion.min_amount, None);
        assert!(!promotion.is_discount());
    }

    #[tokio::test]
    async fn test_failed_promotion_writes_leave_cache() {
        let store = Arc::new(MemoryStore::new());
        let mut session = admin_session(store.clone()).await;
        let id = session
            .add_promotion(promo_draft(Some(20.0), None))
            .await
            .unwrap()
            .id
            .clone();
        let before = session.catalog().promotions.clone();
        store.fail_writes(Table::Promotions, true);

        let err = session
            .add_promotion(promo_draft(Some(5.0), None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);

        let err = session
            .update_promotion(&id, promo_draft(None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);

        let err = session.delete_promotion(&id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);

        assert_eq!(session.catalog().promotions, before);
    }

    #[tokio::test]
    async fn test_promotion_writes_require_admin() {
        let store = Arc::new(MemoryStore::new());
        let mut session = AppSession::bootstrap(store.clone(), Config::default()).await;
        session
            .register(
                shared::models::NewUser {
                    full_name: "Maria".into(),
                    phone: "1".into(),
                },
                "abcd",
            )
            .await
            .unwrap();

        let err = session
            .add_promotion(promo_draft(Some(10.0), None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
        let err = session
            .update_promotion("promo-1", promo_draft(None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
        let err = session.delete_promotion("promo-1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
        assert!(store.is_empty(Table::Promotions));
        assert!(session.catalog().find_promotion("promo-1").is_some());
    }

    #[tokio::test]
    async fn test_failed_order_user_dashboard_writes_leave_cache() {
        let store = Arc::new(MemoryStore::new().with_records(
            Table::Users,
            [serde_json::json!({"id": "user-1", "fullName": "Alex Doe", "totalSpent": 0})],
        ));
        store.seed(
            Table::Orders,
            [serde_json::json!({
                "id": "order-1",
                "date": "2024-05-15",
                "items": [],
                "total": 100,
                "paymentMethod": "cash",
                "deliveryDetails": {"type": "pickup", "name": "Alex Doe", "phone": "1"},
                "customerName": "Alex Doe"
            })],
        );
        let mut session = admin_session(store.clone()).await;
        assert_eq!(session.all_orders().unwrap().len(), 1);
        assert_eq!(session.all_users().unwrap().len(), 1);

        store.fail_writes(Table::Orders, true);
        store.fail_writes(Table::Users, true);
        store.fail_writes(Table::DashboardConfig, true);

        let err = session.delete_order("order-1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);
        let err = session.delete_user("user-1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);
        let err = session
            .update_dashboard(DashboardConfig {
                welcome_title: "Hola".into(),
                ..DashboardConfig::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);

        assert_eq!(session.all_orders().unwrap().len(), 1);
        assert_eq!(session.all_users().unwrap().len(), 1);
        assert_eq!(session.dashboard().welcome_title, "Bienvenido");
        assert_eq!(store.len(Table::Orders), 1);
    }
}
