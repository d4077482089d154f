//! Orders

pub mod data;
pub mod errors;
pub mod models;
mod numbers;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
