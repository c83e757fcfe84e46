use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use axum::{Router, routing::get};
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use nakshatra::application::ports::asset_storage::AssetStorage;
use nakshatra::bootstrap::app_context::{AppContext, AppServices};
use nakshatra::bootstrap::config::{Config, StorageBackend};
use nakshatra::infrastructure::db::repositories::{
    book_repository_sqlx::SqlxBookRepository, cart_repository_sqlx::SqlxCartRepository,
    category_repository_sqlx::SqlxCategoryRepository,
    checkout_repository_sqlx::SqlxCheckoutRepository,
    coupon_repository_sqlx::SqlxCouponRepository, order_repository_sqlx::SqlxOrderRepository,
    user_repository_sqlx::SqlxUserRepository,
};
use nakshatra::infrastructure::payment::razorpay::RazorpayGateway;
use nakshatra::presentation::http as routes;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::auth::signup,
            routes::auth::login,
            routes::auth::me,
            routes::books::list_books,
            routes::books::get_book,
            routes::books::list_by_category,
            routes::books::add_book,
            routes::books::update_book,
            routes::books::delete_book,
            routes::books::download_book,
            routes::books::serve_cover,
            routes::categories::list_categories,
            routes::categories::create_category,
            routes::cart::get_cart,
            routes::cart::add_to_cart,
            routes::cart::remove_from_cart,
            routes::cart::update_cart_item,
            routes::coupons::create_coupon,
            routes::coupons::list_coupons,
            routes::coupons::toggle_coupon,
            routes::coupons::apply_coupon,
            routes::payment::create_order,
            routes::payment::verify_payment,
            routes::profile::get_profile,
            routes::profile::update_profile,
            routes::orders::my_orders,
            routes::orders::get_order,
            routes::orders::request_refund,
            routes::orders::add_chat,
            routes::admin::list_users,
            routes::admin::user_details,
            routes::admin::list_orders,
            routes::admin::update_delivery_status,
            routes::admin::update_refund_status,
            routes::admin::order_chat,
            routes::health::health,
        ),
        components(schemas(
            routes::error::MessageBody,
            routes::auth::SignupRequest,
            routes::auth::LoginRequest,
            routes::auth::LoginResponse,
            routes::auth::UserSummary,
            routes::books::BookResponse,
            routes::books::BookCreatedResponse,
            routes::books::AddBookMultipart,
            routes::books::UpdateBookRequest,
            routes::categories::CategoryResponse,
            routes::categories::CreateCategoryRequest,
            routes::cart::CartResponse,
            routes::cart::CartItemResponse,
            routes::cart::AddToCartRequest,
            routes::cart::UpdateCartRequest,
            routes::coupons::CouponResponse,
            routes::coupons::CreateCouponRequest,
            routes::coupons::CouponCreatedResponse,
            routes::coupons::ApplyCouponRequest,
            routes::coupons::ApplyCouponResponse,
            routes::payment::CreateOrderRequest,
            routes::payment::CreateOrderResponse,
            routes::payment::VerifyPaymentRequest,
            routes::payment::VerifyPaymentResponse,
            routes::profile::AddressDto,
            routes::profile::ProfileResponse,
            routes::profile::UpdateProfileRequest,
            routes::profile::ProfileUpdatedResponse,
            routes::orders::OrderResponse,
            routes::orders::OrderItemResponse,
            routes::orders::TrackingEventResponse,
            routes::orders::ChatMessageResponse,
            routes::orders::OrderUpdatedResponse,
            routes::orders::ChatResponse,
            routes::orders::RefundRequestBody,
            routes::orders::ChatRequest,
            routes::admin::AdminOrderResponse,
            routes::admin::BuyerSummary,
            routes::admin::UserDetailsResponse,
            routes::admin::UpdateDeliveryRequest,
            routes::admin::UpdateRefundRequest,
            routes::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Signup, login and token introspection"),
            (name = "Books", description = "Catalog and book assets"),
            (name = "Categories", description = "Book categories"),
            (name = "Cart", description = "Shopping cart"),
            (name = "Coupons", description = "Discount coupons"),
            (name = "Payment", description = "Checkout through the payment gateway"),
            (name = "User", description = "Own profile"),
            (name = "Orders", description = "Buyer orders, refunds and support chat"),
            (name = "Admin", description = "Store administration"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        // development only; production requires FRONTEND_URL
        _ if !cfg.is_production => AllowOrigin::mirror_request(),
        _ => AllowOrigin::exact(HeaderValue::from_static("http://invalid")),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "nakshatra=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(
        port = cfg.api_port,
        storage = ?cfg.storage_backend,
        production = cfg.is_production,
        "starting_nakshatra_api"
    );

    // Database
    let pool = nakshatra::infrastructure::db::connect_pool(&cfg.database_url).await?;
    nakshatra::infrastructure::db::migrate(&pool).await?;

    let asset_storage: Arc<dyn AssetStorage> = match cfg.storage_backend {
        StorageBackend::Filesystem => {
            if let Err(e) = tokio::fs::create_dir_all(&cfg.storage_root).await {
                tracing::warn!(error = ?e, dir = %cfg.storage_root, "create_storage_root_failed");
            }
            Arc::new(nakshatra::infrastructure::storage::fs::FsAssetStorage::new(
                &cfg.storage_root,
            ))
        }
        StorageBackend::S3 => {
            Arc::new(nakshatra::infrastructure::storage::s3::S3AssetStorage::new(&cfg).await?)
        }
    };
    if cfg.razorpay_key_id.is_empty() || cfg.razorpay_key_secret.is_empty() {
        tracing::warn!("payment_gateway_keys_missing");
    }

    let services = AppServices {
        pool: pool.clone(),
        user_repo: Arc::new(SqlxUserRepository::new(pool.clone())),
        book_repo: Arc::new(SqlxBookRepository::new(pool.clone())),
        category_repo: Arc::new(SqlxCategoryRepository::new(pool.clone())),
        cart_repo: Arc::new(SqlxCartRepository::new(pool.clone())),
        coupon_repo: Arc::new(SqlxCouponRepository::new(pool.clone())),
        checkout_repo: Arc::new(SqlxCheckoutRepository::new(pool.clone())),
        order_repo: Arc::new(SqlxOrderRepository::new(pool.clone())),
        payment_gateway: Arc::new(RazorpayGateway::new(
            &cfg.razorpay_api_base,
            &cfg.razorpay_key_id,
            &cfg.razorpay_key_secret,
        )),
        asset_storage,
    };
    let ctx = AppContext::new(cfg.clone(), services);

    // Two files per upload plus text fields
    let body_limit = cfg.upload_max_bytes.saturating_mul(2).saturating_add(1024 * 1024);

    let app = Router::new()
        .route("/", get(routes::health::banner))
        .nest("/api", routes::health::routes(pool.clone()))
        .nest("/api/auth", routes::auth::routes(ctx.clone()))
        .nest("/api/books", routes::books::routes(ctx.clone()))
        .nest("/api/uploads", routes::books::upload_routes(ctx.clone()))
        .nest("/api/categories", routes::categories::routes(ctx.clone()))
        .nest("/api/cart", routes::cart::routes(ctx.clone()))
        .nest("/api/coupons", routes::coupons::routes(ctx.clone()))
        .nest("/api/payment", routes::payment::routes(ctx.clone()))
        .nest("/api/user", routes::profile::routes(ctx.clone()))
        .nest("/api/orders", routes::orders::routes(ctx.clone()))
        .nest("/api/admin", routes::admin::routes(ctx.clone()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "http_api_listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = ?e, "api_server_failed");
        return Err(e.into());
    }
    info!("api_server_stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "shutdown_signal_failed");
    }
}
