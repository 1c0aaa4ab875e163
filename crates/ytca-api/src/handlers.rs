//! Request handlers.

pub mod graphql;
pub mod health;

pub use graphql::*;
pub use health::*;
