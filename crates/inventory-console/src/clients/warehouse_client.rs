//! # Warehouse Client
//!
//! Client for the `almacenes` page.
use super::PageClient;
use async_trait::async_trait;
use crate::model::Warehouse;
use resource_sync::SyncClient;

#[derive(Clone)]
pub struct WarehouseClient {
    inner: SyncClient<Warehouse>,
}

impl WarehouseClient {
    pub fn new(inner: SyncClient<Warehouse>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PageClient<Warehouse> for WarehouseClient {
    fn inner(&self) -> &SyncClient<Warehouse> {
        &self.inner
    }
}
