//! # Resource Sync
//!
//! This crate keeps a local, ordered mirror of a remote REST collection in step with the
//! server and manages the single draft record an operator is editing. It is written once,
//! generically, and instantiated for every resource type the console administers.
//!
//! ## Why one generic synchronizer?
//!
//! Every admin page does the same five things: fetch the list, start a blank form, copy a
//! row into the form, submit the form as a create or an update, and delete a row. Only
//! the record shape and the collection path differ. Those two things live in the
//! [`Record`] trait; everything else lives in [`Synchronizer`].
//!
//! ## Architecture Overview
//!
//! 1. **Record Layer** ([`Record`], [`binder`]) - record shape, identity, form coercion
//! 2. **Sync Layer** ([`Synchronizer`]) - mirror, draft, generation, error notice
//! 3. **Transport Layer** ([`RemoteCollection`]) - [`HttpCollection`] or [`mock::MockCollection`]
//! 4. **Runtime Layer** ([`SyncActor`], [`SyncClient`]) - one Tokio task per resource type
//!
//! ```rust,ignore
//! use resource_sync::{HttpCollection, SyncActor, SyncOptions};
//!
//! let collection = HttpCollection::<Warehouse>::new("http://localhost:8080");
//! let (actor, client) = SyncActor::new(32, Box::new(collection), SyncOptions::default());
//! tokio::spawn(actor.run());
//!
//! client.load().await?;
//! client.begin_edit_id(WarehouseId(1)).await?;
//! client.update_field("uso_actual", "55").await?;
//! client.submit().await?; // PUT /almacenes/1, then GET /almacenes
//! ```
//!
//! ## Concurrency Model
//!
//! - Each synchronizer runs in its own Tokio task
//! - Requests are processed **sequentially** within a synchronizer, so a later load can
//!   never be overwritten by an earlier one that completes late
//! - Different resource types run in **parallel**
//!
//! ## Testing
//!
//! [`mock::MockCollection`] stands in for the server with queued expectations and a call
//! log, so synchronizer behavior can be tested without a network.

pub mod actor;
pub mod binder;
pub mod client;
pub mod draft;
pub mod error;
pub mod http;
pub mod message;
pub mod mock;
pub mod record;
pub mod remote;
pub mod synchronizer;

#[doc(hidden)]
pub use paste as __paste;

// Re-export core types for convenience
pub use actor::SyncActor;
pub use binder::{BindError, Binding, FieldRule, FieldValue};
pub use client::SyncClient;
pub use draft::Draft;
pub use error::SyncError;
pub use http::{build_client, HttpCollection};
pub use message::{Response, SyncRequest};
pub use record::{Record, Violation};
pub use remote::{RemoteCollection, RemoteError};
pub use synchronizer::{
    DeletePolicy, ErrorNotice, Operation, Submitted, SyncOptions, SyncView, Synchronizer,
};
