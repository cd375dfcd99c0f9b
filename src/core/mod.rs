//! Core module - API client, settings and worker reconciliation

pub mod auth;
pub mod context;
pub mod environments;
pub mod error;
pub mod invites;
pub mod jobs;
pub mod models;
pub mod services;
pub mod settings;
pub mod transport;
pub mod workers;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{Overrides, RequestContext};
pub use error::{Error, Result};
pub use settings::{AssociatedEnv, Settings};
pub use transport::{HttpTransport, Transport};
pub use workers::{reconcile, WorkerCount, WorkerListing, WorkerSummary};
