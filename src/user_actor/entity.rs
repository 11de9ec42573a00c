use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};
use super::error::UserError;

fn checked_email(email: String) -> Result<String, UserError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(UserError::ValidationError(format!("Invalid email: {}", email))),
    }
}

fn checked_name(name: String) -> Result<String, UserError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(UserError::ValidationError("Name required".to_string()));
    }
    Ok(name)
}

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    const KIND: &'static str = "user";

    fn id(&self) -> &String { &self.id }

    /// Creates a new User from creation parameters.
    ///
    /// Emails are stored lowercased so uniqueness checks are case-insensitive.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        if params.company_id.is_empty() {
            return Err(UserError::ValidationError("Company required".to_string()));
        }
        Ok(Self {
            id,
            company_id: params.company_id,
            name: checked_name(params.name)?,
            email: checked_email(params.email)?,
            role: params.role,
        })
    }

    fn tenant_id(&self) -> Option<&str> {
        Some(&self.company_id)
    }

    fn conflicts_with(&self, existing: &Self) -> Option<String> {
        (self.email == existing.email).then(|| self.email.clone())
    }

    /// Updates the user's profile information.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(name) = patch.name {
            self.name = checked_name(name)?;
        }
        if let Some(email) = patch.email {
            self.email = checked_email(email)?;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn email_is_normalised() {
        let user = User::from_create_params(
            "user_1".into(),
            UserCreate::staff("company_1", "Alice", " Alice@Example.COM "),
        )
        .unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, Role::Staff);
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["", "alice", "@example.com", "alice@localhost"] {
            let err = User::from_create_params("user_1".into(), UserCreate::staff("company_1", "Alice", email))
                .unwrap_err();
            assert!(matches!(err, UserError::ValidationError(_)), "{email}");
        }
    }

    #[test]
    fn update_applies_role_change() {
        let mut user = User::from_create_params(
            "user_1".into(),
            UserCreate::staff("company_1", "Alice", "alice@example.com"),
        )
        .unwrap();
        user.on_update(UserPatch { role: Some(Role::Admin), ..Default::default() }).unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
