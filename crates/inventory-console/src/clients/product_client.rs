//! # Product Client
//!
//! The product page shows each product's category by name, so it reads two mirrors:
//! its own and the category page's. It wraps both synchronizer clients; the category
//! one is a clone of the handle the category page uses, so both pages share a mirror.
use super::PageClient;
use crate::model::{Category, Product};
use async_trait::async_trait;
use resource_sync::{SyncClient, SyncError, SyncView};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductClient {
    inner: SyncClient<Product>,
    categories: SyncClient<Category>,
}

/// Everything the product list needs to render.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub products: SyncView<Product>,
    pub categories: Vec<Category>,
}

impl ProductClient {
    pub fn new(inner: SyncClient<Product>, categories: SyncClient<Category>) -> Self {
        Self { inner, categories }
    }

    /// The loaded categories, used as options for `categoria_id` and for the join.
    pub async fn categories(&self) -> Result<Vec<Category>, SyncError> {
        Ok(self.categories.snapshot().await?.mirror)
    }

    /// Snapshot of the product page together with the category mirror.
    #[instrument(skip(self))]
    pub async fn listing(&self) -> Result<ProductListing, SyncError> {
        let (products, categories) = tokio::join!(self.inner.snapshot(), self.categories());
        Ok(ProductListing {
            products: products?,
            categories: categories?,
        })
    }
}

#[async_trait]
impl PageClient<Product> for ProductClient {
    fn inner(&self) -> &SyncClient<Product> {
        &self.inner
    }

    /// Loads products and categories. A failed category load is logged by its
    /// synchronizer and only leaves category names blank.
    #[instrument(skip(self))]
    async fn load(&self) -> Result<usize, SyncError> {
        debug!("Sending request");
        let (products, categories) = tokio::join!(self.inner.load(), self.categories.load());
        if let Err(e) = categories {
            debug!(error = %e, "Category names unavailable");
        }
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;
    use resource_sync::mock::MockCollection;
    use resource_sync::{RemoteError, SyncActor, SyncOptions};

    fn spawn<T: resource_sync::Record>(mock: &MockCollection<T>) -> SyncClient<T> {
        let (actor, client) = SyncActor::new(4, mock.collection(), SyncOptions::default());
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_load_fetches_both_collections() {
        let mut products = MockCollection::<Product>::new();
        products
            .expect_list()
            .return_ok(vec![Product::new(1, "Leche", Some(2), 1.5)]);
        let mut categories = MockCollection::<Category>::new();
        categories
            .expect_list()
            .return_ok(vec![Category::new(2, "Lácteos", "COMIDA")]);

        let client = ProductClient::new(spawn(&products), spawn(&categories));
        assert_eq!(client.load().await.unwrap(), 1);

        let listing = client.listing().await.unwrap();
        assert_eq!(listing.products.mirror.len(), 1);
        assert_eq!(listing.categories[0].id, Some(CategoryId(2)));
        products.verify();
        categories.verify();
    }

    #[tokio::test]
    async fn test_category_failure_does_not_fail_product_load() {
        let mut products = MockCollection::<Product>::new();
        products.expect_list().return_ok(vec![]);
        let mut categories = MockCollection::<Category>::new();
        categories
            .expect_list()
            .return_err(RemoteError::Transport("down".into()));

        let client = ProductClient::new(spawn(&products), spawn(&categories));
        assert_eq!(client.load().await.unwrap(), 0);
        assert!(client.categories().await.unwrap().is_empty());
    }
}
