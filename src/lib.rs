//! Paginated photo search client.
//!
//! - [`api`] - typed client for the remote search and image endpoints
//! - [`cache`] - image byte cache with read-through lookup
//! - [`search`] - search session state machine, pagination and runtime
//! - [`config`] - TOML configuration
//! - [`logging`] - tracing setup

pub mod api;
pub mod cache;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod search;
