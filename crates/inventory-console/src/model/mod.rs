//! # Inventory Records
//!
//! The three resources the console administers. Field names are the server's JSON
//! names; every type implements [`Record`](resource_sync::Record) so it can be mirrored
//! by a [`Synchronizer`](resource_sync::Synchronizer).

pub mod category;
pub mod product;
pub mod warehouse;

pub use category::*;
pub use product::*;
pub use warehouse::*;
