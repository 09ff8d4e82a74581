//! # Console Lifecycle
//!
//! Starting, wiring and stopping the three page synchronizers.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let system = ConsoleSystem::new(&config)?;   // one shared HTTP pool, three actors
//! system.load_all().await;                      // initial fetch of every page
//! // ... drive the pages through system.warehouses / categories / products ...
//! system.shutdown().await?;                     // drop clients, await actors
//! ```
//!
//! The product page holds a clone of the category client, so category names shown
//! next to products come from the same mirror the category page edits. Since that
//! dependency is acyclic, dropping the system's clients is enough to stop every actor.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber used by the binary:
//!
//! ```bash
//! RUST_LOG=info inventory-console    # loads, writes, failures
//! RUST_LOG=debug inventory-console   # full payloads
//! ```

pub mod console_system;
pub mod telemetry;

pub use console_system::*;
pub use telemetry::*;
