use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::payment::create_order::CreateCheckoutOrder;
use crate::application::use_cases::payment::verify_payment::{PaymentConfirmation, VerifyPayment};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, authenticate};
use crate::presentation::http::error::{ApiError, MessageBody};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub coupon_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Minor units (paise).
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: Uuid,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/payment/create-order", tag = "Payment", request_body = CreateOrderRequest, responses(
    (status = 200, body = CreateOrderResponse),
    (status = 400, body = MessageBody),
    (status = 502, body = MessageBody)
))]
pub async fn create_order(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    body: Option<Json<CreateOrderRequest>>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let coupon_code = req
        .coupon_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let carts = ctx.cart_repo();
    let coupons = ctx.coupon_repo();
    let gateway = ctx.payment_gateway();
    let checkouts = ctx.checkout_repo();
    let uc = CreateCheckoutOrder {
        carts: carts.as_ref(),
        coupons: coupons.as_ref(),
        gateway: gateway.as_ref(),
        checkouts: checkouts.as_ref(),
        currency: &ctx.cfg.currency,
    };
    let order = uc.execute(caller.id, coupon_code).await?;
    Ok(Json(CreateOrderResponse {
        order_id: order.gateway_order_id,
        amount: order.amount,
        currency: order.currency,
        key_id: order.key_id,
    }))
}

#[utoipa::path(post, path = "/api/payment/verify-payment", tag = "Payment", request_body = VerifyPaymentRequest, responses(
    (status = 200, body = VerifyPaymentResponse),
    (status = 400, body = MessageBody),
    (status = 500, body = MessageBody)
))]
pub async fn verify_payment(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let users = ctx.user_repo();
    let orders = ctx.order_repo();
    let checkouts = ctx.checkout_repo();
    let gateway = ctx.payment_gateway();
    let uc = VerifyPayment {
        users: users.as_ref(),
        orders: orders.as_ref(),
        checkouts: checkouts.as_ref(),
        gateway: gateway.as_ref(),
    };
    let confirmation = PaymentConfirmation {
        gateway_order_id: req.razorpay_order_id,
        gateway_payment_id: req.razorpay_payment_id,
        signature: req.razorpay_signature,
    };
    let order_id = uc.execute(caller.id, &confirmation).await?;
    Ok(Json(VerifyPaymentResponse {
        message: "Payment verified successfully".into(),
        order_id,
    }))
}
