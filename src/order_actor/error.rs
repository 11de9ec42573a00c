use rust_decimal::Decimal;
use thiserror::Error;
use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid company: {0}")]
    InvalidCompany(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock { product_id: String, requested: u64, available: u32 },
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order total is negative: {0}")]
    NegativeTotal(Decimal),
    #[error("Cannot {action} an order that is {from}")]
    InvalidStatusTransition { from: OrderStatus, action: &'static str },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
