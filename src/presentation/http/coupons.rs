use axum::{
    Json, Router,
    extract::{Path as AxumPath, State},
    http::StatusCode,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::coupons::apply_coupon::ApplyCoupon;
use crate::application::use_cases::coupons::create_coupon::CreateCoupon;
use crate::application::use_cases::coupons::list_coupons::ListCoupons;
use crate::application::use_cases::coupons::toggle_coupon::ToggleCoupon;
use crate::bootstrap::app_context::AppContext;
use crate::domain::coupons::coupon::{Coupon, DiscountType, NewCoupon};
use crate::presentation::http::auth::{Bearer, authenticate, require_admin};
use crate::presentation::http::error::{ApiError, MessageBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: Decimal,
    pub is_active: bool,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Coupon> for CouponResponse {
    fn from(c: Coupon) -> Self {
        Self {
            id: c.id,
            code: c.code,
            discount_type: c.discount_type.as_str().to_string(),
            discount_value: c.discount_value,
            is_active: c.is_active,
            expires_at: c.expires_at,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub code: String,
    /// `percentage` or `fixed`.
    pub discount_type: String,
    pub discount_value: Decimal,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponCreatedResponse {
    pub message: String,
    pub coupon: CouponResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyCouponRequest {
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponResponse {
    pub message: String,
    pub discount_type: String,
    pub discount_value: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_coupons))
        .route("/add", post(create_coupon))
        .route("/apply", post(apply_coupon))
        .route("/:id/toggle", put(toggle_coupon))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/coupons/add", tag = "Coupons", request_body = CreateCouponRequest, responses(
    (status = 201, body = CouponCreatedResponse),
    (status = 400, body = MessageBody)
))]
pub async fn create_coupon(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateCouponRequest>,
) -> Result<(StatusCode, Json<CouponCreatedResponse>), ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let discount_type = DiscountType::parse(req.discount_type.trim())
        .ok_or_else(|| ApiError::bad_request("discountType must be 'percentage' or 'fixed'"))?;
    let repo = ctx.coupon_repo();
    let uc = CreateCoupon {
        repo: repo.as_ref(),
    };
    let coupon = uc
        .execute(NewCoupon {
            code: req.code,
            discount_type,
            discount_value: req.discount_value,
            expires_at: req.expires_at,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CouponCreatedResponse {
            message: "Coupon created successfully".into(),
            coupon: coupon.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/coupons", tag = "Coupons", responses(
    (status = 200, body = [CouponResponse])
))]
pub async fn list_coupons(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<CouponResponse>>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.coupon_repo();
    let uc = ListCoupons {
        repo: repo.as_ref(),
    };
    let items = uc.execute().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(put, path = "/api/coupons/{id}/toggle", tag = "Coupons",
    params(("id" = Uuid, Path, description = "Coupon ID")),
    responses((status = 200, body = CouponResponse), (status = 404, body = MessageBody))
)]
pub async fn toggle_coupon(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<CouponResponse>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.coupon_repo();
    let uc = ToggleCoupon {
        repo: repo.as_ref(),
    };
    let coupon = uc
        .execute(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Coupon not found"))?;
    Ok(Json(coupon.into()))
}

#[utoipa::path(post, path = "/api/coupons/apply", tag = "Coupons", request_body = ApplyCouponRequest, responses(
    (status = 200, body = ApplyCouponResponse),
    (status = 400, body = MessageBody)
))]
pub async fn apply_coupon(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<ApplyCouponRequest>,
) -> Result<Json<ApplyCouponResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let coupons = ctx.coupon_repo();
    let carts = ctx.cart_repo();
    let uc = ApplyCoupon {
        coupons: coupons.as_ref(),
        carts: carts.as_ref(),
    };
    let applied = uc.execute(caller.id, &req.code).await?;
    Ok(Json(ApplyCouponResponse {
        message: "Coupon applied successfully".into(),
        discount_type: applied.coupon.discount_type.as_str().to_string(),
        discount_value: applied.coupon.discount_value,
        subtotal: applied.quote.subtotal,
        discount: applied.quote.discount,
        total: applied.quote.total,
    }))
}
