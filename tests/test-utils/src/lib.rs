//! Test utilities and fixtures for the symbol registry workspace
//!
//! This module provides shared testing utilities including:
//! - Secret file fixtures and fake environments
//! - Ticker factories
//! - Log capture for asserting on emitted diagnostics
//! - Async and numeric assertions

pub mod assertions;
pub mod factories;
pub mod fixtures;
pub mod helpers;

pub use assertions::*;
pub use factories::*;
pub use fixtures::*;
pub use helpers::*;
