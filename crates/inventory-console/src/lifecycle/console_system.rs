use crate::clients::{CategoryClient, PageClient, ProductClient, WarehouseClient};
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::model::{Category, Product, Warehouse};
use crate::pages::{self, Page};
use resource_sync::{build_client, HttpCollection, RemoteCollection, SyncError};
use tracing::{info, warn};

/// Runtime orchestrator for the console's page synchronizers.
///
/// # Architecture
///
/// - **Warehouse page**: `almacenes`
/// - **Category page**: `categorias`
/// - **Product page**: `items`, plus a read handle on the category page
///
/// Each page runs its own actor, so requests on one page never wait on another.
pub struct ConsoleSystem {
    pub warehouses: WarehouseClient,
    pub categories: CategoryClient,
    pub products: ProductClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ConsoleSystem {
    /// Starts all pages against the REST API at `config.api_url`.
    ///
    /// The three collections share one `reqwest` connection pool.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let http = build_client(config.request_timeout)?;
        info!(api_url = %config.api_url, "Connecting pages");
        Ok(Self::start(
            config,
            Box::new(HttpCollection::<Warehouse>::with_client(http.clone(), &config.api_url)),
            Box::new(HttpCollection::<Category>::with_client(http.clone(), &config.api_url)),
            Box::new(HttpCollection::<Product>::with_client(http, &config.api_url)),
        ))
    }

    /// Starts all pages against arbitrary remote collections.
    pub fn start(
        config: &ConsoleConfig,
        warehouses: Box<dyn RemoteCollection<Warehouse>>,
        categories: Box<dyn RemoteCollection<Category>>,
        products: Box<dyn RemoteCollection<Product>>,
    ) -> Self {
        // 1. Create actors
        let (warehouse_actor, warehouse_client) = pages::new(warehouses, config);
        let (category_actor, category_client) = pages::new(categories, config);
        let (product_actor, product_client) = pages::new(products, config);

        // 2. Start them
        let handles = vec![
            tokio::spawn(warehouse_actor.run()),
            tokio::spawn(category_actor.run()),
            tokio::spawn(product_actor.run()),
        ];

        Self {
            warehouses: WarehouseClient::new(warehouse_client),
            products: ProductClient::new(product_client, category_client.clone()),
            categories: CategoryClient::new(category_client),
            handles,
        }
    }

    /// Initial fetch of every page. Failures are logged and reported per page; a page
    /// that failed to load starts empty and can be reloaded later.
    pub async fn load_all(&self) -> Vec<(Page, Result<usize, SyncError>)> {
        let (warehouses, categories, products) = tokio::join!(
            self.warehouses.load(),
            self.categories.load(),
            self.products.inner().load(),
        );
        let results = vec![
            (Page::Warehouses, warehouses),
            (Page::Categories, categories),
            (Page::Products, products),
        ];
        for (page, result) in &results {
            match result {
                Ok(size) => info!(%page, size, "Page ready"),
                Err(e) => warn!(%page, error = %e, "Page not loaded"),
            }
        }
        results
    }

    /// Gracefully shuts down every page.
    ///
    /// 1. Drops all clients, closing the mailboxes
    /// 2. Awaits every actor task
    pub async fn shutdown(self) -> Result<(), ConsoleError> {
        info!("Initiating graceful shutdown");

        drop(self.warehouses);
        drop(self.categories);
        drop(self.products);

        for handle in self.handles {
            handle.await?;
        }

        info!("Shutdown complete");
        Ok(())
    }
}
