use tracing::{debug, info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductPatch, StockMovement};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product, products);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

impl ProductClient {
    #[instrument(skip(self, params), fields(company_id = %params.company_id, sku = %params.sku))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(product_id = %id, "Product created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.inner.update(id, patch).await?;
        info!(unit_price = %product.unit_price, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    async fn move_stock(&self, id: String, action: ProductAction) -> Result<StockMovement, ProductError> {
        match self.inner.perform_action(id, action).await? {
            ProductActionResult::Moved(movement) => {
                debug!(delta = movement.delta, quantity_after = movement.quantity_after, "Stock moved");
                Ok(movement)
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn receive_stock(&self, id: String, quantity: u32) -> Result<StockMovement, ProductError> {
        self.move_stock(id, ProductAction::Receive(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<StockMovement, ProductError> {
        self.move_stock(id, ProductAction::Reserve(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<StockMovement, ProductError> {
        self.move_stock(id, ProductAction::Release(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: String, delta: i64, note: Option<String>) -> Result<StockMovement, ProductError> {
        let movement = self.move_stock(id, ProductAction::Adjust { delta, note }).await?;
        info!(quantity_after = movement.quantity_after, "Stock adjusted");
        Ok(movement)
    }

    /// Products at or below their reorder level, lowest stock first.
    #[instrument(skip(self))]
    pub async fn low_stock(&self, company_id: String) -> Result<Vec<Product>, ProductError> {
        let mut low: Vec<Product> = self
            .inner
            .list(Some(company_id))
            .await?
            .into_iter()
            .filter(Product::is_low_stock)
            .collect();
        low.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.sku.cmp(&b.sku)));
        if !low.is_empty() {
            warn!(count = low.len(), "Products at or below reorder level");
        }
        Ok(low)
    }
}
