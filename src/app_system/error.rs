use thiserror::Error;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;

/// Failures of system-level operations that span several actors.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
