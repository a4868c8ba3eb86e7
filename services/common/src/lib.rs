//! Common configuration, property registry, and error types shared by services

pub mod constants;
pub mod errors;
pub mod properties;
pub mod settings;

pub use errors::*;
pub use properties::*;
pub use settings::*;
