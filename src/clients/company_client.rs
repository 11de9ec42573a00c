use tracing::{error, info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::clients::UserClient;
use crate::company_actor::CompanyError;
use crate::domain::{Company, CompanyCreate, CompanyPatch, CompanySignup, Role, SignupReceipt, UserCreate};

/// Client for interacting with the Company actor.
///
/// Signup spans two actors: the company record and its first admin user.
#[derive(Clone)]
pub struct CompanyClient {
    inner: ResourceClient<Company>,
    user_client: UserClient,
}

impl CompanyClient {
    pub fn new(inner: ResourceClient<Company>, user_client: UserClient) -> Self {
        Self { inner, user_client }
    }

    /// Registers a company and its admin. The company is removed again if
    /// the admin cannot be created.
    #[instrument(skip(self, signup), fields(company_name = %signup.company_name, admin_email = %signup.admin_email))]
    pub async fn sign_up(&self, signup: CompanySignup) -> Result<SignupReceipt, CompanyError> {
        info!("Processing sign_up request");

        let company_id = self
            .inner
            .create(CompanyCreate { name: signup.company_name, industry: signup.industry })
            .await?;

        let admin = UserCreate {
            company_id: company_id.clone(),
            name: signup.admin_name,
            email: signup.admin_email,
            role: Role::Admin,
        };

        match self.user_client.create_user(admin).await {
            Ok(admin_user_id) => {
                info!(%company_id, %admin_user_id, "Signup completed");
                Ok(SignupReceipt { company_id, admin_user_id })
            }
            Err(e) => {
                warn!(error = %e, %company_id, "Admin creation failed, removing company");
                if let Err(rollback) = self.inner.delete(company_id).await {
                    error!(error = %rollback, "Company rollback failed");
                }
                Err(CompanyError::AdminRejected(e))
            }
        }
    }

    /// Renames or reclassifies a company. Names stay unique.
    #[instrument(skip(self))]
    pub async fn update_company(&self, id: String, patch: CompanyPatch) -> Result<Company, CompanyError> {
        self.inner.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn list_all_companies(&self) -> Result<Vec<Company>, CompanyError> {
        self.inner.list(None).await
    }
}

impl_client_methods!(CompanyClient, Company, CompanyError, company, companies);
