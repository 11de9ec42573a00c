use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in a company's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub company_id: String,
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    /// Units on hand, net of reservations.
    pub quantity: u32,
    pub reorder_level: u32,
    pub movements: Vec<StockMovement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementReason {
    Received,
    Adjustment,
    Reserved,
    Released,
}

/// One entry in a product's stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub delta: i64,
    pub reason: MovementReason,
    pub note: Option<String>,
    pub quantity_after: u32,
    pub at: DateTime<Utc>,
}

/// Params for adding a product to the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub company_id: String,
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub reorder_level: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub reorder_level: Option<u32>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Value of the units on hand at the catalog price.
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_price)
    }
}
