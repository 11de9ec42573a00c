use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info, instrument};
use crate::actor_framework::ResourceActor;
use crate::app_system::{SystemConfig, SystemError};
use crate::clients::{CompanyClient, OrderClient, ProductClient, UserClient};
use crate::dashboard::{summarize, DashboardSummary};
use crate::domain::{Company, Order, Product, User};

/// Returns a generator yielding `prefix_1`, `prefix_2`, ...
fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct InventorySystem {
    pub company_client: CompanyClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    pub fn new(config: &SystemConfig) -> Self {
        let buffer = config.channel_buffer;

        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer, sequential_ids("user"));
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        let (company_actor, company_resource_client) =
            ResourceActor::<Company>::new(buffer, sequential_ids("company"));
        let company_client = CompanyClient::new(company_resource_client, user_client.clone());
        let company_handle = tokio::spawn(company_actor.run());

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(buffer, sequential_ids("product"));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer, sequential_ids("order"));
        let order_client = OrderClient::new(
            order_resource_client,
            company_client.clone(),
            user_client.clone(),
            product_client.clone(),
            config.order_policy(),
        );
        let order_handle = tokio::spawn(order_actor.run());

        info!(buffer, allow_credit_orders = config.allow_credit_orders, "Inventory system started");

        Self {
            company_client,
            user_client,
            product_client,
            order_client,
            handles: vec![user_handle, company_handle, product_handle, order_handle],
        }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self, company_id: String) -> Result<DashboardSummary, SystemError> {
        let products = self.product_client.list_products(company_id.clone()).await?;
        let orders = self.order_client.list_orders(company_id).await?;
        Ok(summarize(&products, &orders))
    }

    /// Drops every client, which closes the actor channels, then waits for the actors to exit.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // Every client clone must go before the actors see their channels close.
        drop(self.order_client);
        drop(self.company_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::ActorTask(e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
