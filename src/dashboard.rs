//! Tenant dashboard figures derived from products and orders.

use std::collections::BTreeMap;
use rust_decimal::Decimal;
use serde::Serialize;
use crate::domain::{Order, OrderStatus, Product};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockItem {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub reorder_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    pub units_on_hand: u64,
    pub inventory_value: Decimal,
    pub low_stock: Vec<LowStockItem>,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
    pub open_orders: usize,
    /// Grand totals of every order that was not cancelled.
    pub revenue: Decimal,
}

pub fn summarize(products: &[Product], orders: &[Order]) -> DashboardSummary {
    let mut low_stock: Vec<LowStockItem> = products
        .iter()
        .filter(|product| product.is_low_stock())
        .map(|product| LowStockItem {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity: product.quantity,
            reorder_level: product.reorder_level,
        })
        .collect();
    low_stock.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.sku.cmp(&b.sku)));

    let mut orders_by_status = BTreeMap::new();
    for order in orders {
        *orders_by_status.entry(order.status).or_insert(0) += 1;
    }

    DashboardSummary {
        product_count: products.len(),
        units_on_hand: products.iter().map(|product| u64::from(product.quantity)).sum(),
        inventory_value: products.iter().map(Product::stock_value).sum(),
        low_stock,
        open_orders: orders.iter().filter(|order| order.status.is_open()).count(),
        revenue: orders
            .iter()
            .filter(|order| order.status != OrderStatus::Cancelled)
            .map(|order| order.totals.grand_total)
            .sum(),
        orders_by_status,
    }
}
