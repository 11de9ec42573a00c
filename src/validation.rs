//! Input checks for order drafts, run before any actor is contacted.

use crate::domain::{OrderDraft, MAX_AMOUNT};
use crate::order_actor::OrderError;

/// Collects every problem with a draft instead of stopping at the first.
///
/// Negative discounts pass; the totals calculator floors them.
pub fn validate_draft(draft: &OrderDraft) -> Result<(), OrderError> {
    let mut problems = Vec::new();

    if draft.company_id.trim().is_empty() {
        problems.push("company is required".to_string());
    }
    if draft.created_by.trim().is_empty() {
        problems.push("creating user is required".to_string());
    }
    if draft.customer_name.trim().is_empty() {
        problems.push("customer name is required".to_string());
    }
    if draft.lines.is_empty() {
        problems.push("at least one line is required".to_string());
    }

    for (index, line) in draft.lines.iter().enumerate() {
        let n = index + 1;
        if line.product_id.trim().is_empty() {
            problems.push(format!("line {n}: product is required"));
        }
        if line.quantity == 0 {
            problems.push(format!("line {n}: quantity must be positive"));
        }
        if let Some(price) = line.unit_price {
            if price.is_sign_negative() && !price.is_zero() {
                problems.push(format!("line {n}: unit price cannot be negative"));
            }
            if price > MAX_AMOUNT {
                problems.push(format!("line {n}: unit price cannot exceed {MAX_AMOUNT}"));
            }
        }
        if line.discount > MAX_AMOUNT {
            problems.push(format!("line {n}: discount cannot exceed {MAX_AMOUNT}"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(OrderError::ValidationError(problems.join("; ")))
    }
}
