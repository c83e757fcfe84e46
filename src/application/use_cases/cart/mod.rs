pub mod add_to_cart;
pub mod get_cart;
pub mod remove_from_cart;
pub mod update_cart_item;

use crate::domain::cart::cart::{CartMutation, MAX_CART_QUANTITY};

#[derive(thiserror::Error, Debug)]
pub enum CartError {
    #[error("Book not found")]
    BookNotFound,
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    #[error("Quantity cannot exceed 1000")]
    QuantityTooLarge,
    #[error("Cart not found")]
    CartNotFound,
    #[error("Item not found in cart")]
    ItemNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub(crate) fn check_quantity(quantity: i32) -> Result<(), CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity);
    }
    if quantity > MAX_CART_QUANTITY {
        return Err(CartError::QuantityTooLarge);
    }
    Ok(())
}

pub(crate) fn check_mutation(outcome: CartMutation) -> Result<(), CartError> {
    match outcome {
        CartMutation::Applied => Ok(()),
        CartMutation::CartMissing => Err(CartError::CartNotFound),
        CartMutation::ItemMissing => Err(CartError::ItemNotFound),
    }
}
