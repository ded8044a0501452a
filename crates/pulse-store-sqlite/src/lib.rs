//! SQLite implementation of the pulse reporting store.

mod error;
mod schema;
mod store;


pub use error::{Error, Result};
pub use store::SqliteStore;
