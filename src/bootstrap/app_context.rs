use std::sync::Arc;

use crate::application::ports::asset_storage::AssetStorage;
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::checkout_repository::CheckoutRepository;
use crate::application::ports::coupon_repository::CouponRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::payment_gateway::PaymentGateway;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    pub pool: PgPool,
    pub user_repo: Arc<dyn UserRepository>,
    pub book_repo: Arc<dyn BookRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub cart_repo: Arc<dyn CartRepository>,
    pub coupon_repo: Arc<dyn CouponRepository>,
    pub checkout_repo: Arc<dyn CheckoutRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub asset_storage: Arc<dyn AssetStorage>,
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.services.pool
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn book_repo(&self) -> Arc<dyn BookRepository> {
        self.services.book_repo.clone()
    }

    pub fn category_repo(&self) -> Arc<dyn CategoryRepository> {
        self.services.category_repo.clone()
    }

    pub fn cart_repo(&self) -> Arc<dyn CartRepository> {
        self.services.cart_repo.clone()
    }

    pub fn coupon_repo(&self) -> Arc<dyn CouponRepository> {
        self.services.coupon_repo.clone()
    }

    pub fn checkout_repo(&self) -> Arc<dyn CheckoutRepository> {
        self.services.checkout_repo.clone()
    }

    pub fn order_repo(&self) -> Arc<dyn OrderRepository> {
        self.services.order_repo.clone()
    }

    pub fn payment_gateway(&self) -> Arc<dyn PaymentGateway> {
        self.services.payment_gateway.clone()
    }

    pub fn asset_storage(&self) -> Arc<dyn AssetStorage> {
        self.services.asset_storage.clone()
    }
}
