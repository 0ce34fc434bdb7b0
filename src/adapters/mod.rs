//! External integrations
//!
//! Adapters wrap the collaborators the pipeline talks to: the asset store
//! HTTP API and the product catalog database. Core code depends on the
//! traits defined here, never on the concrete clients.

pub mod assets;
pub mod database;
