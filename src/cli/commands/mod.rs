//! CLI command implementations

pub mod associate;
pub mod completions;
pub mod config;
pub mod disassociate;
pub mod invites;
pub mod logout;
pub mod services;
pub mod worker;
