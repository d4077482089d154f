//! Carts

pub mod data;
pub mod errors;
mod locks;
pub mod models;
pub mod service;

pub use errors::CartsServiceError;
pub use locks::CartLocks;
pub use service::*;
