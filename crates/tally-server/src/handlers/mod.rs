//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod auth;
pub mod budget;
pub mod summary;
pub mod transactions;

// Re-export all handlers for use in router
pub use auth::*;
pub use budget::*;
pub use summary::*;
pub use transactions::*;
