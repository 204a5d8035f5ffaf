//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the
//! `dbsage-server`. The handlers are split into logical sub-modules based on
//! their functionality.

pub mod connection;
pub mod documentation;
pub mod general;
pub mod query;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use connection::*;
pub use documentation::*;
pub use general::*;
pub use query::*;
