use axum::{
    Json, Router,
    extract::{Path as AxumPath, State},
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::cart::add_to_cart::AddToCart;
use crate::application::use_cases::cart::get_cart::GetCart;
use crate::application::use_cases::cart::remove_from_cart::RemoveFromCart;
use crate::application::use_cases::cart::update_cart_item::UpdateCartItem;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{Bearer, authenticate};
use crate::presentation::http::books::BookResponse;
use crate::presentation::http::error::{ApiError, MessageBody};

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub book: BookResponse,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub subtotal: Decimal,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub book_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub book_id: Uuid,
    pub quantity: i32,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(get_cart))
        .route("/add", post(add_to_cart))
        .route("/remove/:book_id", delete(remove_from_cart))
        .route("/update", put(update_cart_item))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/cart", tag = "Cart", responses(
    (status = 200, body = CartResponse),
    (status = 401, body = MessageBody)
))]
pub async fn get_cart(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<CartResponse>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.cart_repo();
    let uc = GetCart {
        repo: repo.as_ref(),
    };
    let view = uc.execute(caller.id).await?;
    Ok(Json(CartResponse {
        items: view
            .lines
            .into_iter()
            .map(|l| CartItemResponse {
                quantity: l.quantity,
                book: l.book.into(),
            })
            .collect(),
        subtotal: view.subtotal,
    }))
}

#[utoipa::path(post, path = "/api/cart/add", tag = "Cart", request_body = AddToCartRequest, responses(
    (status = 200, body = MessageBody),
    (status = 404, body = MessageBody)
))]
pub async fn add_to_cart(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let carts = ctx.cart_repo();
    let books = ctx.book_repo();
    let uc = AddToCart {
        carts: carts.as_ref(),
        books: books.as_ref(),
    };
    uc.execute(caller.id, req.book_id, req.quantity).await?;
    Ok(MessageBody::new("Book added to cart"))
}

#[utoipa::path(delete, path = "/api/cart/remove/{book_id}", tag = "Cart",
    params(("book_id" = Uuid, Path, description = "Book ID")),
    responses((status = 200, body = MessageBody), (status = 404, body = MessageBody))
)]
pub async fn remove_from_cart(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    AxumPath(book_id): AxumPath<Uuid>,
) -> Result<Json<MessageBody>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.cart_repo();
    let uc = RemoveFromCart {
        repo: repo.as_ref(),
    };
    uc.execute(caller.id, book_id).await?;
    Ok(MessageBody::new("Book removed from cart"))
}

#[utoipa::path(put, path = "/api/cart/update", tag = "Cart", request_body = UpdateCartRequest, responses(
    (status = 200, body = MessageBody),
    (status = 400, body = MessageBody),
    (status = 404, body = MessageBody)
))]
pub async fn update_cart_item(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<UpdateCartRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let caller = authenticate(&ctx.cfg, bearer)?;
    let repo = ctx.cart_repo();
    let uc = UpdateCartItem {
        repo: repo.as_ref(),
    };
    uc.execute(caller.id, req.book_id, req.quantity).await?;
    Ok(MessageBody::new("Cart updated"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_request_defaults_quantity_to_one() {
        let req: AddToCartRequest = serde_json::from_str(
            r#"{"bookId":"7d0f4c1e-2d4a-4c39-9a9e-3f1f5b1f0a11"}"#,
        )
        .unwrap();
        assert_eq!(req.quantity, 1);
    }
}
