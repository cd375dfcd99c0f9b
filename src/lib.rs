//! paas: a command-line client for the platform control plane
//!
//! Manages organization invitations and reports background worker status
//! for deployed services.

pub mod cli;
pub mod core;
