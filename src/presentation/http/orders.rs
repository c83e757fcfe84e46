use axum::{
    Json, Router,
    extract::{Path as AxumPath, State},
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::orders::add_chat::AddChat;
use crate::application::use_cases::orders::get_order::GetOrder;
use crate::application::use_cases::orders::list_my_orders::ListMyOrders;
use crate::application::use_cases::orders::request_refund::RequestRefund;
use crate::bootstrap::app_context::AppContext;
use crate::domain::orders::order::{ChatMessage, Order, OrderItem, TrackingEvent};
use crate::presentation::http::auth::{Bearer, authenticate};
use crate::presentation::http::books::cover_url;
use crate::presentation::http::error::{ApiError, MessageBody};
use crate::presentation::http::profile::AddressDto;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    /// `None` once the book has been removed from the catalog.
    pub book_id: Option<Uuid>,
    pub title: String,
    pub cover_image: String,
    pub quantity: i32,
    pub price: Decimal,
    pub refund_status: String,
    pub refund_reason: String,
    pub refund_requested_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(i: OrderItem) -> Self {
        Self {
            cover_image: cover_url(&i.cover_path),
            id: i.id,
            book_id: i.book_id,
            title: i.title,
            quantity: i.quantity,
            price: i.price,
            refund_status: i.refund.status.as_str().to_string(),
            refund_reason: i.refund.reason,
            refund_requested_at: i.refund.requested_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackingEventResponse {
    pub status: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl From<TrackingEvent> for TrackingEventResponse {
    fn from(e: TrackingEvent) -> Self {
        Self {
            status: e.status,
            message: e.message,
            timestamp: e.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatMessageResponse {
    pub sender: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(m: ChatMessage) -> Self {
        Self {
            sender: m.sender.as_str().to_string(),
            message: m.message,
            timestamp: m.created_at,
        }
    }
}

pub(crate) fn chat_history(messages: Vec<ChatMessage>) -> Vec<ChatMessageResponse> {
    messages.into_iter().map(Into::into).collect()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub coupon_code: Option<String>,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub payment_status: String,
    pub delivery_status: String,
    pub estimated_delivery_date: Option<chrono::DateTime<chrono::Utc>>,
    pub shipping_address: AddressDto,
    pub phone: String,
    pub tracking_history: Vec<TrackingEventResponse>,
    pub chat_history: Vec<ChatMessageResponse>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            items: o.items.into_iter().map(Into::into).collect(),
            subtotal: o.subtotal,
            discount: o.discount,
            total_amount: o.total_amount,
            coupon_code: o.coupon_code,
            razorpay_order_id: o.gateway_order_id,
            razorpay_payment_id: o.gateway_payment_id,
            payment_status: o.payment_status.as_str().to_string(),
            delivery_status: o.delivery_status.as_str().to_string(),
            estimated_delivery_date: o.estimated_delivery_date,
            shipping_address: AddressDto {
                street: o.shipping.street,
                city: o.shipping.city,
                state: o.shipping.state,
                zip_code: o.shipping.zip_code,
            },
            phone: o.shipping.phone,
            tracking_history: o.tracking_history.into_iter().map(Into::into).collect(),
            chat_history: chat_history(o.chat_history),
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderUpdatedResponse {
    pub message: String,
    pub order: OrderResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub chat_history: Vec<ChatMessageResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefundRequestBody {
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/my-orders", get(my_orders))
        .route("/:order_id", get(get_order))
        .route("/request-refund/:order_id/:item_id", put(request_refund))
        .route("/add-chat/:order_id", post(add_chat))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/orders/my-orders", tag = "Orders", responses(
    (status = 200, body = [OrderResponse])
))]
pub async fn my_orders(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = ListMyOrders {
        repo: repo.as_ref(),
    };
    let orders = uc.execute(caller.id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/orders/{order_id}", tag = "Orders",
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, body = OrderResponse),
        (status = 401, body = MessageBody),
        (status = 404, body = MessageBody)
    )
)]
pub async fn get_order(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(order_id): AxumPath<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = GetOrder {
        repo: repo.as_ref(),
    };
    Ok(Json(uc.execute(caller.id, order_id).await?.into()))
}

#[utoipa::path(put, path = "/api/orders/request-refund/{order_id}/{item_id}", tag = "Orders",
    request_body = RefundRequestBody,
    params(
        ("order_id" = Uuid, Path, description = "Order ID"),
        ("item_id" = Uuid, Path, description = "Order item ID")
    ),
    responses(
        (status = 200, body = OrderUpdatedResponse),
        (status = 400, body = MessageBody),
        (status = 404, body = MessageBody)
    )
)]
pub async fn request_refund(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath((order_id, item_id)): AxumPath<(Uuid, Uuid)>,
    Json(req): Json<RefundRequestBody>,
) -> Result<Json<OrderUpdatedResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = RequestRefund {
        repo: repo.as_ref(),
    };
    let order = uc.execute(caller.id, order_id, item_id, &req.reason).await?;
    Ok(Json(OrderUpdatedResponse {
        message: "Refund requested successfully".into(),
        order: order.into(),
    }))
}

#[utoipa::path(post, path = "/api/orders/add-chat/{order_id}", tag = "Orders",
    request_body = ChatRequest,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses((status = 200, body = ChatResponse), (status = 400, body = MessageBody))
)]
pub async fn add_chat(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(order_id): AxumPath<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = AddChat {
        repo: repo.as_ref(),
    };
    let history = uc.execute(caller.id, order_id, &req.message).await?;
    Ok(Json(ChatResponse {
        message: "Message sent".into(),
        chat_history: chat_history(history),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryStore, placed_order, sample_user};
    use crate::application::ports::order_repository::OrderRepository;

    #[tokio::test]
    async fn order_response_uses_client_field_names() {
        let store = InMemoryStore::default();
        let user = store.insert_user(sample_user("Tara"));
        let order_id = placed_order(&store, user.id, &["Pather Panchali"]).await;
        let order = store.get_by_id(order_id).await.unwrap().unwrap();

        let json = serde_json::to_value(OrderResponse::from(order)).unwrap();
        assert_eq!(json["deliveryStatus"], "Pending");
        assert_eq!(json["paymentStatus"], "success");
        assert_eq!(json["items"][0]["refundStatus"], "None");
        assert!(json["items"][0]["coverImage"]
            .as_str()
            .unwrap()
            .starts_with("/api/uploads/covers/"));
        assert_eq!(
            json["trackingHistory"][0]["message"],
            "Your order has been placed successfully."
        );
    }
}
