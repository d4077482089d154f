//! Shared application domain and persistence modules.

pub mod auth;
pub mod cache;
pub mod context;
pub mod database;
pub mod domain;
pub mod timeouts;

#[cfg(test)]
mod test;
