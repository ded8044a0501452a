//! Core types and sync logic for the pulse reporting pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! remote API and the reporting store are reached through the
//! [`fetch::RemoteSource`] and [`store::ReportingStore`] traits; concrete
//! implementations live in `pulse-client` and `pulse-store-sqlite`.

pub mod assoc;
pub mod config;
pub mod error;
pub mod fetch;
pub mod map;
pub mod model;
pub mod row;
pub mod store;
pub mod sync;
pub mod window;

pub use error::{Error, Result};
