use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, Shipment};
use super::actions::OrderAction;
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders only change through lifecycle actions
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    const KIND: &'static str = "order";

    fn id(&self) -> &String { &self.id }

    /// Creates a new Order from already resolved items and totals.
    ///
    /// # Notes
    /// The order is initialized with status `Pending`.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("Order items cannot be empty".to_string()));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            company_id: params.company_id,
            created_by: params.created_by,
            customer_name: params.customer_name,
            items: params.items,
            totals: params.totals,
            status: OrderStatus::Pending,
            shipment: None,
            cancelled_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn tenant_id(&self) -> Option<&str> {
        Some(&self.company_id)
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    /// Applies a lifecycle transition and returns the updated order.
    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        let invalid = |from: OrderStatus, action: &OrderAction| OrderError::InvalidStatusTransition {
            from,
            action: action.name(),
        };
        match (self.status, &action) {
            (OrderStatus::Pending, OrderAction::StartProcessing) => {
                self.status = OrderStatus::Processing;
            }
            (OrderStatus::Processing, OrderAction::Ship { carrier, tracking_number }) => {
                if carrier.trim().is_empty() || tracking_number.trim().is_empty() {
                    return Err(OrderError::ValidationError("Carrier and tracking number required".to_string()));
                }
                self.status = OrderStatus::Shipped;
                self.shipment = Some(Shipment {
                    carrier: carrier.clone(),
                    tracking_number: tracking_number.clone(),
                    shipped_at: Utc::now(),
                });
            }
            (OrderStatus::Shipped, OrderAction::Deliver) => {
                self.status = OrderStatus::Delivered;
            }
            (status, OrderAction::Cancel { reason }) if status.is_open() => {
                self.status = OrderStatus::Cancelled;
                self.cancelled_reason = reason.clone();
            }
            (status, action) => return Err(invalid(status, action)),
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}
