use axum::{
    Json, Router,
    extract::{Path as AxumPath, State},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::admin::get_user_details::GetUserDetails;
use crate::application::use_cases::admin::list_orders::ListAllOrders;
use crate::application::use_cases::admin::list_users::ListUsers;
use crate::application::use_cases::admin::send_chat::SendAdminChat;
use crate::application::use_cases::admin::update_delivery_status::UpdateDeliveryStatus;
use crate::application::use_cases::admin::update_refund_status::UpdateRefundStatus;
use crate::bootstrap::app_context::AppContext;
use crate::domain::orders::order::OrderWithBuyer;
use crate::presentation::http::auth::{Bearer, require_admin};
use crate::presentation::http::error::{ApiError, MessageBody};
use crate::presentation::http::orders::{
    ChatRequest, ChatResponse, OrderResponse, OrderUpdatedResponse, chat_history,
};
use crate::presentation::http::profile::ProfileResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct BuyerSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    /// Absent when the buyer account no longer exists.
    pub user: Option<BuyerSummary>,
}

impl From<OrderWithBuyer> for AdminOrderResponse {
    fn from(row: OrderWithBuyer) -> Self {
        let user = match (row.buyer_name, row.buyer_email) {
            (Some(name), Some(email)) => Some(BuyerSummary { name, email }),
            _ => None,
        };
        Self {
            order: row.order.into(),
            user,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailsResponse {
    pub user: ProfileResponse,
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryRequest {
    /// One of Pending, Processing, Shipped, Out for Delivery, Delivered, Cancelled.
    pub delivery_status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRefundRequest {
    /// One of None, Requested, Approved, Rejected, Processing, Refunded.
    pub refund_status: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/user/:user_id", get(user_details))
        .route("/orders", get(list_orders))
        .route("/update-status/:order_id", put(update_delivery_status))
        .route("/update-refund/:order_id/:item_id", put(update_refund_status))
        .route("/order-chat/:order_id", post(order_chat))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/admin/users", tag = "Admin", responses(
    (status = 200, body = [ProfileResponse]),
    (status = 403, body = MessageBody)
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/api/admin/user/{user_id}", tag = "Admin",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = UserDetailsResponse), (status = 404, body = MessageBody))
)]
pub async fn user_details(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(user_id): AxumPath<Uuid>,
) -> Result<Json<UserDetailsResponse>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let users = ctx.user_repo();
    let orders = ctx.order_repo();
    let uc = GetUserDetails {
        users: users.as_ref(),
        orders: orders.as_ref(),
    };
    let details = uc.execute(user_id).await?;
    Ok(Json(UserDetailsResponse {
        user: details.user.into(),
        orders: details.orders.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(get, path = "/api/admin/orders", tag = "Admin", responses(
    (status = 200, body = [AdminOrderResponse])
))]
pub async fn list_orders(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<AdminOrderResponse>>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = ListAllOrders {
        repo: repo.as_ref(),
    };
    let rows = uc.execute().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(put, path = "/api/admin/update-status/{order_id}", tag = "Admin",
    request_body = UpdateDeliveryRequest,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, body = OrderUpdatedResponse),
        (status = 400, body = MessageBody),
        (status = 404, body = MessageBody)
    )
)]
pub async fn update_delivery_status(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(order_id): AxumPath<Uuid>,
    Json(req): Json<UpdateDeliveryRequest>,
) -> Result<Json<OrderUpdatedResponse>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = UpdateDeliveryStatus {
        repo: repo.as_ref(),
    };
    let order = uc.execute(order_id, &req.delivery_status).await?;
    Ok(Json(OrderUpdatedResponse {
        message: "Order status updated successfully".into(),
        order: order.into(),
    }))
}

#[utoipa::path(put, path = "/api/admin/update-refund/{order_id}/{item_id}", tag = "Admin",
    request_body = UpdateRefundRequest,
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
pub async fn update_refund_status(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath((order_id, item_id)): AxumPath<(Uuid, Uuid)>,
    Json(req): Json<UpdateRefundRequest>,
) -> Result<Json<OrderUpdatedResponse>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = UpdateRefundStatus {
        repo: repo.as_ref(),
    };
    let order = uc.execute(order_id, item_id, &req.refund_status).await?;
    Ok(Json(OrderUpdatedResponse {
        message: "Refund status updated successfully".into(),
        order: order.into(),
    }))
}

#[utoipa::path(post, path = "/api/admin/order-chat/{order_id}", tag = "Admin",
    request_body = ChatRequest,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    responses((status = 200, body = ChatResponse), (status = 400, body = MessageBody))
)]
pub async fn order_chat(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(order_id): AxumPath<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    require_admin(&ctx.cfg, bearer)?;
    let repo = ctx.order_repo();
    let uc = SendAdminChat {
        repo: repo.as_ref(),
    };
    let history = uc.execute(order_id, &req.message).await?;
    Ok(Json(ChatResponse {
        message: "Message sent".into(),
        chat_history: chat_history(history),
    }))
}
