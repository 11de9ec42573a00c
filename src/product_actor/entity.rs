use chrono::Utc;
use rust_decimal::Decimal;
use crate::actor_framework::Entity;
use crate::domain::{MovementReason, Product, ProductCreate, ProductPatch, StockMovement, MAX_AMOUNT};
use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;

fn checked_price(price: Decimal) -> Result<Decimal, ProductError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::ValidationError(format!("Negative price: {}", price)));
    }
    if price > MAX_AMOUNT {
        return Err(ProductError::ValidationError(format!("Price above {}: {}", MAX_AMOUNT, price)));
    }
    Ok(price)
}

fn checked_name(name: String) -> Result<String, ProductError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ProductError::ValidationError("Product name required".to_string()));
    }
    Ok(name)
}

impl Product {
    fn record(&mut self, delta: i64, reason: MovementReason, note: Option<String>) -> StockMovement {
        let movement = StockMovement {
            delta,
            reason,
            note,
            quantity_after: self.quantity,
            at: Utc::now(),
        };
        self.movements.push(movement.clone());
        movement
    }

    fn add_units(&mut self, amount: u32) -> Result<(), ProductError> {
        self.quantity = self.quantity.checked_add(amount).ok_or_else(|| {
            ProductError::ValidationError(format!("Stock overflow adding {} to {}", amount, self.quantity))
        })?;
        Ok(())
    }

    fn take_units(&mut self, amount: u64) -> Result<(), ProductError> {
        let available = self.quantity;
        match u32::try_from(amount).ok().and_then(|amount| available.checked_sub(amount)) {
            Some(left) => {
                self.quantity = left;
                Ok(())
            }
            None => Err(ProductError::InsufficientStock { requested: amount, available }),
        }
    }
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    const KIND: &'static str = "product";

    fn id(&self) -> &String { &self.id }

    /// Creates a new Product from creation parameters.
    ///
    /// Opening stock is booked as the first `Received` movement.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        let sku = params.sku.trim().to_uppercase();
        if sku.is_empty() {
            return Err(ProductError::ValidationError("SKU required".to_string()));
        }
        Ok(Self {
            id,
            company_id: params.company_id,
            sku,
            name: checked_name(params.name)?,
            unit_price: checked_price(params.unit_price)?,
            quantity: params.quantity,
            reorder_level: params.reorder_level,
            movements: Vec::new(),
        })
    }

    fn tenant_id(&self) -> Option<&str> {
        Some(&self.company_id)
    }

    /// SKUs are unique per company.
    fn conflicts_with(&self, existing: &Self) -> Option<String> {
        (self.company_id == existing.company_id && self.sku == existing.sku)
            .then(|| format!("SKU {}", self.sku))
    }

    fn on_create(&mut self) -> Result<(), ProductError> {
        if self.quantity > 0 {
            self.record(i64::from(self.quantity), MovementReason::Received, Some("opening stock".to_string()));
        }
        Ok(())
    }

    /// Updates catalog fields. Stock is only changed through actions.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            self.name = checked_name(name)?;
        }
        if let Some(price) = patch.unit_price {
            self.unit_price = checked_price(price)?;
        }
        if let Some(level) = patch.reorder_level {
            self.reorder_level = level;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        let movement = match action {
            ProductAction::CheckStock => return Ok(ProductActionResult::StockLevel(self.quantity)),
            ProductAction::Receive(0) | ProductAction::Reserve(0) | ProductAction::Release(0) => {
                return Err(ProductError::InvalidQuantity(0));
            }
            ProductAction::Receive(amount) => {
                self.add_units(amount)?;
                self.record(i64::from(amount), MovementReason::Received, None)
            }
            ProductAction::Reserve(amount) => {
                self.take_units(u64::from(amount))?;
                self.record(-i64::from(amount), MovementReason::Reserved, None)
            }
            ProductAction::Release(amount) => {
                self.add_units(amount)?;
                self.record(i64::from(amount), MovementReason::Released, None)
            }
            ProductAction::Adjust { delta: 0, .. } => return Err(ProductError::InvalidQuantity(0)),
            ProductAction::Adjust { delta, note } => {
                if delta > 0 {
                    let amount = u32::try_from(delta).map_err(|_| {
                        ProductError::ValidationError(format!("Adjustment too large: {}", delta))
                    })?;
                    self.add_units(amount)?;
                } else {
                    self.take_units(delta.unsigned_abs())?;
                }
                self.record(delta, MovementReason::Adjustment, note)
            }
        };
        Ok(ProductActionResult::Moved(movement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn widget(quantity: u32) -> Product {
        let mut product = Product::from_create_params(
            "product_1".into(),
            ProductCreate {
                company_id: "company_1".into(),
                sku: " wid-01 ".into(),
                name: "Widget".into(),
                unit_price: dec!(4.25),
                quantity,
                reorder_level: 3,
            },
        )
        .unwrap();
        product.on_create().unwrap();
        product
    }

    #[test]
    fn opening_stock_is_a_movement() {
        let product = widget(10);
        assert_eq!(product.sku, "WID-01");
        assert_eq!(product.movements.len(), 1);
        assert_eq!(product.movements[0].reason, MovementReason::Received);
        assert!(widget(0).movements.is_empty());
    }

    #[test]
    fn reserve_beyond_stock_fails() {
        let mut product = widget(4);
        let err = product.handle_action(ProductAction::Reserve(5)).unwrap_err();
        assert_eq!(err, ProductError::InsufficientStock { requested: 5, available: 4 });
        assert_eq!(product.quantity, 4);
    }

    #[test]
    fn reserve_and_release_round_trip() {
        let mut product = widget(4);
        product.handle_action(ProductAction::Reserve(4)).unwrap();
        assert_eq!(product.quantity, 0);
        assert!(product.is_low_stock());

        let moved = product.handle_action(ProductAction::Release(1)).unwrap();
        match moved {
            ProductActionResult::Moved(movement) => {
                assert_eq!(movement.reason, MovementReason::Released);
                assert_eq!(movement.quantity_after, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn adjustments_cannot_go_below_zero() {
        let mut product = widget(2);
        let err = product
            .handle_action(ProductAction::Adjust { delta: -3, note: Some("shrinkage".into()) })
            .unwrap_err();
        assert_eq!(err, ProductError::InsufficientStock { requested: 3, available: 2 });

        product.handle_action(ProductAction::Adjust { delta: -2, note: None }).unwrap();
        assert_eq!(product.quantity, 0);
        assert_eq!(product.handle_action(ProductAction::Adjust { delta: 0, note: None }).unwrap_err(),
            ProductError::InvalidQuantity(0));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut product = widget(1);
        let err = product
            .on_update(ProductPatch { unit_price: Some(dec!(-1)), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, ProductError::ValidationError(_)));
        assert_eq!(product.stock_value(), dec!(4.25));
    }

    #[test]
    fn oversized_price_is_rejected() {
        let mut product = widget(1);
        let err = product
            .on_update(ProductPatch { unit_price: Some(MAX_AMOUNT + dec!(0.01)), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, ProductError::ValidationError(_)));

        product.on_update(ProductPatch { unit_price: Some(MAX_AMOUNT), ..Default::default() }).unwrap();
        assert_eq!(product.stock_value(), MAX_AMOUNT);
    }

    #[test]
    fn stock_value_saturates() {
        let mut product = widget(0);
        product.quantity = u32::MAX;
        product.unit_price = Decimal::MAX;
        assert_eq!(product.stock_value(), Decimal::MAX);
    }

    #[test]
    fn rename_is_trimmed_and_required() {
        let mut product = widget(1);
        let err = product
            .on_update(ProductPatch { name: Some("   ".into()), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, ProductError::ValidationError(_)));
        assert_eq!(product.name, "Widget");

        product.on_update(ProductPatch { name: Some(" Blue widget ".into()), ..Default::default() }).unwrap();
        assert_eq!(product.name, "Blue widget");
    }
}
