//! # Inventory Console
//!
//! Admin console for a restaurant's inventory: warehouses, product categories and
//! products, each kept in step with a REST API by a [`resource_sync`] synchronizer.
//!
//! ## Core Components
//!
//! - **[model]**: The three records and their JSON wire shape.
//! - **[clients]**: Page clients over the synchronizer handles; the product client also
//!   reads the category mirror.
//! - **[render]**: Plain-text tables, draft forms and row intents.
//! - **[lifecycle]**: [`ConsoleSystem`](lifecycle::ConsoleSystem) starts and stops the
//!   page actors; tracing setup.
//! - **[shell]**: Terminal commands.
//!
//! ## Testing
//!
//! See [`resource_sync::mock`] for the in-memory remote collection used to test pages
//! without a server.

pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod pages;
pub mod render;
pub mod shell;
