//! Typed handles over the resource actors. Orchestration that spans
//! several actors (signup, order creation) lives here too.

#[macro_use]
mod macros;

pub mod company_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use company_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
