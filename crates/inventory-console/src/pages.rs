//! # Pages
//!
//! One synchronizer per admin page. [`new`] creates the actor and its client for a
//! record type, the way every page is wired; [`Page`] names the pages the console
//! can address.

use crate::config::ConsoleConfig;
use resource_sync::{Record, RemoteCollection, SyncActor, SyncClient};
use std::fmt::Display;
use std::str::FromStr;

/// Creates a synchronizer actor and its client for `T`.
pub fn new<T: Record>(
    remote: Box<dyn RemoteCollection<T>>,
    config: &ConsoleConfig,
) -> (SyncActor<T>, SyncClient<T>) {
    SyncActor::new(config.channel_buffer, remote, config.sync)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Warehouses,
    Categories,
    Products,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Warehouses, Page::Categories, Page::Products];

    /// Name used in commands and headings.
    pub fn name(&self) -> &'static str {
        match self {
            Page::Warehouses => "almacenes",
            Page::Categories => "categorias",
            Page::Products => "productos",
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "almacenes" | "warehouses" => Ok(Page::Warehouses),
            "categorias" | "categorías" | "categories" => Ok(Page::Categories),
            "productos" | "items" | "products" => Ok(Page::Products),
            other => Err(other.to_string()),
        }
    }
}
