//! Symbol registry service
//!
//! Looks up tradable symbols by ticker over a relational store and exposes
//! the lookups over HTTP. Startup publishes file-mounted secrets before the
//! database pool is built; see [`bootstrap`].

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod model;
pub mod models;
pub mod persistence;
pub mod repository;
pub mod server;

pub use error::{RegistryError, RegistryResult};
pub use model::Symbol;
pub use persistence::PgSymbolRepository;
pub use repository::{InMemorySymbolRepository, SymbolRepository};
