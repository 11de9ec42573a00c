use tracing::{error, info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::clients::{CompanyClient, ProductClient, UserClient};
use crate::domain::{calculate_totals, Order, OrderCreate, OrderDraft, OrderLineItem};
use crate::order_actor::{OrderAction, OrderError};
use crate::product_actor::ProductError;
use crate::validation::validate_draft;

/// Business rules the order flow applies on top of the totals calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderPolicy {
    /// Accept orders whose discounts exceed their subtotal.
    pub allow_credit_orders: bool,
}

/// Client for interacting with the Order actor.
///
/// This client handles complex orchestration, validating the tenant, the
/// user and every product before reserving stock and creating the order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    company_client: CompanyClient,
    user_client: UserClient,
    product_client: ProductClient,
    policy: OrderPolicy,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        company_client: CompanyClient,
        user_client: UserClient,
        product_client: ProductClient,
        policy: OrderPolicy,
    ) -> Self {
        Self {
            inner,
            company_client,
            user_client,
            product_client,
            policy,
        }
    }

    #[instrument(skip(self, draft), fields(company_id = %draft.company_id, lines = draft.lines.len()))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<String, OrderError> {
        info!("Processing create_order request");
        validate_draft(&draft)?;

        // Step 1: Validate company
        match self.company_client.get_company(draft.company_id.clone()).await {
            Ok(Some(company)) => info!(company_name = %company.name, "Company validation successful"),
            Ok(None) => {
                error!("Company not found");
                return Err(OrderError::InvalidCompany(draft.company_id));
            }
            Err(e) => {
                error!(error = %e, "Company validation failed");
                return Err(OrderError::InvalidCompany(format!("Company validation failed: {}", e)));
            }
        }

        // Step 2: Validate user
        match self.user_client.get_user(draft.created_by.clone()).await {
            Ok(Some(user)) if user.company_id == draft.company_id => {
                info!(user_name = %user.name, "User validation successful")
            }
            Ok(Some(_)) => {
                error!("User belongs to another company");
                return Err(OrderError::InvalidUser(draft.created_by));
            }
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(draft.created_by));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::InvalidUser(format!("User validation failed: {}", e)));
            }
        }

        // Step 3: Resolve lines against the catalog and price them
        let items = self.resolve_lines(&draft).await?;
        let totals = calculate_totals(&items);
        if totals.is_negative() && !self.policy.allow_credit_orders {
            error!(grand_total = %totals.grand_total, "Discounts exceed subtotal");
            return Err(OrderError::NegativeTotal(totals.grand_total));
        }

        // Step 4: Reserve stock
        self.reserve_all(&items).await?;
        info!("Stock reserved successfully");

        // Step 5: Create order in ResourceActor
        let params = OrderCreate {
            company_id: draft.company_id,
            created_by: draft.created_by,
            customer_name: draft.customer_name.trim().to_string(),
            items: items.clone(),
            totals,
        };
        match self.inner.create(params).await {
            Ok(order_id) => {
                info!(%order_id, grand_total = %totals.grand_total, "Order created successfully");
                Ok(order_id)
            }
            Err(e) => {
                error!(error = %e, "Order creation failed, releasing stock");
                self.release_all(&items).await;
                Err(e)
            }
        }
    }

    async fn resolve_lines(&self, draft: &OrderDraft) -> Result<Vec<OrderLineItem>, OrderError> {
        let mut items = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let product = match self.product_client.get_product(line.product_id.clone()).await {
                Ok(Some(product)) if product.company_id == draft.company_id => product,
                Ok(_) => {
                    error!(product_id = %line.product_id, "Product not found for company");
                    return Err(OrderError::InvalidProduct(line.product_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Product validation failed");
                    return Err(OrderError::InvalidProduct(format!("Product validation failed: {}", e)));
                }
            };
            items.push(OrderLineItem::new(
                product.id,
                line.quantity,
                line.unit_price.unwrap_or(product.unit_price),
                line.discount,
            ));
        }
        Ok(items)
    }

    /// Reserves every line or none: on failure the lines already reserved are released.
    async fn reserve_all(&self, items: &[OrderLineItem]) -> Result<(), OrderError> {
        for (index, item) in items.iter().enumerate() {
            if let Err(e) = self.product_client.reserve_stock(item.product_id.clone(), item.quantity).await {
                error!(error = %e, product_id = %item.product_id, "Stock reservation failed");
                self.release_all(&items[..index]).await;
                return Err(match e {
                    ProductError::InsufficientStock { requested, available } => OrderError::InsufficientStock {
                        product_id: item.product_id.clone(),
                        requested,
                        available,
                    },
                    ProductError::NotFound(id) => OrderError::InvalidProduct(id),
                    other => OrderError::ActorCommunicationError(other.to_string()),
                });
            }
        }
        Ok(())
    }

    async fn release_all(&self, items: &[OrderLineItem]) {
        for item in items {
            if let Err(e) = self.product_client.release_stock(item.product_id.clone(), item.quantity).await {
                warn!(error = %e, product_id = %item.product_id, quantity = item.quantity, "Stock release failed");
            }
        }
    }

    async fn transition(&self, id: String, action: OrderAction) -> Result<Order, OrderError> {
        let order = self.inner.perform_action(id, action).await?;
        info!(status = %order.status, "Order status changed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn start_processing(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::StartProcessing).await
    }

    #[instrument(skip(self))]
    pub async fn ship_order(&self, id: String, carrier: String, tracking_number: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Ship { carrier, tracking_number }).await
    }

    #[instrument(skip(self))]
    pub async fn deliver_order(&self, id: String) -> Result<Order, OrderError> {
        self.transition(id, OrderAction::Deliver).await
    }

    /// Cancels an open order and puts its stock back.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String, reason: Option<String>) -> Result<Order, OrderError> {
        let order = self.transition(id, OrderAction::Cancel { reason }).await?;
        self.release_all(&order.items).await;
        Ok(order)
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order, orders);
