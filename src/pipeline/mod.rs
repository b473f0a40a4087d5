//! Pipeline module - loading and classifying attendance data

pub mod classifier;
pub mod error;
pub mod loader;

pub use classifier::*;
pub use error::*;
pub use loader::*;
