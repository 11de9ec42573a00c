pub mod company;
pub mod user;
pub mod product;
pub mod order;
pub mod totals;

pub use company::*;
pub use user::*;
pub use product::*;
pub use order::*;
pub use totals::*;
