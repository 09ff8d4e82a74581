//! # Category Client
use super::PageClient;
use async_trait::async_trait;
use crate::model::Category;
use resource_sync::SyncClient;

#[derive(Clone)]
pub struct CategoryClient {
    inner: SyncClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: SyncClient<Category>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PageClient<Category> for CategoryClient {
    fn inner(&self) -> &SyncClient<Category> {
        &self.inner
    }
}
