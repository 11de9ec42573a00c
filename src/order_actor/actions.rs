/// Lifecycle transitions for an order.
///
/// Pending -> Processing -> Shipped -> Delivered, with Cancel allowed
/// while the order is still Pending or Processing.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    StartProcessing,
    Ship { carrier: String, tracking_number: String },
    Deliver,
    Cancel { reason: Option<String> },
}

impl OrderAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartProcessing => "start_processing",
            Self::Ship { .. } => "ship",
            Self::Deliver => "deliver",
            Self::Cancel { .. } => "cancel",
        }
    }
}
