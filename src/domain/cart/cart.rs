use rust_decimal::Decimal;

use crate::domain::catalog::book::Book;

/// Largest quantity a single cart line may hold.
pub const MAX_CART_QUANTITY: i32 = 1000;

#[derive(Debug, Clone)]
pub struct CartLine {
    pub book: Book,
    pub quantity: i32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.book.price * Decimal::from(self.quantity)
    }
}

pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, |acc, v| acc + v)
}

/// Outcome of a cart mutation that targets an existing cart or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
    Applied,
    CartMissing,
    ItemMissing,
}
