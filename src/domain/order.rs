use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::totals::{OrderLineItem, OrderTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Orders that still hold reserved stock and can be cancelled.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub carrier: String,
    pub tracking_number: String,
    pub shipped_at: DateTime<Utc>,
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub company_id: String,
    pub created_by: String,
    pub customer_name: String,
    pub items: Vec<OrderLineItem>,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    pub shipment: Option<Shipment>,
    pub cancelled_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Params for storing an order whose items and totals are already resolved.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub company_id: String,
    pub created_by: String,
    pub customer_name: String,
    pub items: Vec<OrderLineItem>,
    pub totals: OrderTotals,
}

/// A line as entered on the order form.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub product_id: String,
    pub quantity: u32,
    /// Falls back to the catalog price when absent.
    pub unit_price: Option<Decimal>,
    pub discount: Decimal,
}

/// Unvalidated order input.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub company_id: String,
    pub created_by: String,
    pub customer_name: String,
    pub lines: Vec<DraftLine>,
}

impl DraftLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price: None,
            discount: Decimal::ZERO,
        }
    }

    pub fn with_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }
}
