use crate::domain::StockMovement;

/// Custom actions for Product entities.
///
/// Every action except `CheckStock` changes the on-hand quantity and
/// appends a movement to the product's stock ledger.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Books incoming units, e.g. a supplier delivery.
    Receive(u32),
    /// Sets stock aside for an order.
    ///
    /// # Errors
    /// Fails without touching stock if the amount exceeds what is on hand.
    Reserve(u32),
    /// Returns previously reserved stock.
    Release(u32),
    /// Manual correction after a count, in either direction.
    Adjust { delta: i64, note: Option<String> },
}

#[derive(Debug, Clone)]
pub enum ProductActionResult {
    StockLevel(u32),
    Moved(StockMovement),
}
