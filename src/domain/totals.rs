//! Order total calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest unit price or line discount accepted from a catalog or a draft.
///
/// With quantities capped at `u32::MAX` a line stays below 5e18, far from
/// the range where `Decimal` arithmetic overflows.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A single product-quantity-price-discount tuple within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Flat discount for the whole line, not per unit.
    pub discount_amount: Decimal,
}

impl OrderLineItem {
    pub fn new(
        product_id: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        discount_amount: Decimal,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
            discount_amount,
        }
    }

    /// Quantity times unit price, before any discount. Saturates at `Decimal::MAX`.
    pub fn gross(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_price)
    }

    /// The discount actually applied; negative discounts count as zero.
    pub fn effective_discount(&self) -> Decimal {
        self.discount_amount.max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    /// Not clamped: goes negative when discounts exceed the subtotal.
    pub grand_total: Decimal,
}

impl OrderTotals {
    pub fn is_negative(&self) -> bool {
        self.grand_total.is_sign_negative() && !self.grand_total.is_zero()
    }
}

/// Computes subtotal, discount total and grand total for a list of line items.
///
/// Never panics. Amounts within `MAX_AMOUNT` are exact; beyond that the sums
/// saturate instead of overflowing.
pub fn calculate_totals(items: &[OrderLineItem]) -> OrderTotals {
    let (subtotal, discount_total) = items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(subtotal, discounts), item| {
            (subtotal.saturating_add(item.gross()), discounts.saturating_add(item.effective_discount()))
        },
    );

    OrderTotals {
        subtotal,
        discount_total,
        grand_total: subtotal.saturating_sub(discount_total),
    }
}
