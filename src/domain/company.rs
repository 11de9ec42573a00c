use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant. Every user, product and order belongs to exactly one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Params for registering a company record.
#[derive(Debug, Clone)]
pub struct CompanyCreate {
    pub name: String,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub industry: Option<String>,
}

/// Everything the signup form collects: the company plus its first admin.
#[derive(Debug, Clone)]
pub struct CompanySignup {
    pub company_name: String,
    pub industry: Option<String>,
    pub admin_name: String,
    pub admin_email: String,
}

/// Result of a completed signup.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupReceipt {
    pub company_id: String,
    pub admin_user_id: String,
}
