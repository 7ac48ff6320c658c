//! Database repositories
//!
//! Provides the data access layer over the user store.

pub mod user;

pub use user::{UserRecord, UserRepository};
