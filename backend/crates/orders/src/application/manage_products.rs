//! Manage Products Use Case
//!
//! Catalog administration plus the public reads the storefront needs.

use std::sync::Arc;

use kernel::id::ProductId;
use platform::clock::Clock;

use crate::domain::entity::product::{Product, ProductDraft};
use crate::domain::repository::ProductCatalog;
use crate::error::{OrderError, OrderResult};

pub struct ManageProductsUseCase<P>
where
    P: ProductCatalog,
{
    catalog: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> ManageProductsUseCase<P>
where
    P: ProductCatalog,
{
    pub fn new(catalog: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }

    pub async fn create(&self, draft: ProductDraft) -> OrderResult<Product> {
        let product = Product::new(draft, self.clock.now())?;
        self.catalog.create(&product).await?;

        tracing::info!(product_id = %product.product_id, category = %product.category, "Product created");

        Ok(product)
    }

    pub async fn get(&self, product_id: &ProductId) -> OrderResult<Product> {
        self.catalog
            .find_by_id(product_id)
            .await?
            .ok_or(OrderError::ProductNotFound)
    }

    pub async fn list(&self) -> OrderResult<Vec<Product>> {
        self.catalog.list().await
    }

    /// Full replacement of the editable fields, validated like a new product
    pub async fn update(&self, product_id: &ProductId, draft: ProductDraft) -> OrderResult<Product> {
        let current = self.get(product_id).await?;
        let revised = current.revise(draft, self.clock.now())?;

        if !self.catalog.update(&revised).await? {
            return Err(OrderError::ProductNotFound);
        }

        tracing::info!(product_id = %revised.product_id, "Product updated");
        Ok(revised)
    }

    pub async fn delete(&self, product_id: &ProductId) -> OrderResult<()> {
        if !self.catalog.delete(product_id).await? {
            return Err(OrderError::ProductNotFound);
        }

        tracing::info!(product_id = %product_id, "Product deleted");
        Ok(())
    }
}
