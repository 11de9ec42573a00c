use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Staff,
}

/// Represents a registered member of a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Params for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub company_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Params for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserCreate {
    pub fn staff(company_id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            name: name.into(),
            email: email.into(),
            role: Role::Staff,
        }
    }
}
