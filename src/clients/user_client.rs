use tracing::{debug, info, instrument};
use crate::domain::{User, UserCreate, UserPatch};
use crate::user_actor::UserError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user, users);

impl UserClient {
    #[instrument(skip(self, params), fields(company_id = %params.company_id, role = ?params.role))]
    pub async fn create_user(&self, params: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(user_id = %id, "User created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        let user = self.inner.update(id, patch).await?;
        info!(email = %user.email, role = ?user.role, "User updated");
        Ok(user)
    }
}
