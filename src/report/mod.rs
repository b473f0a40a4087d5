//! Report module - chart model, PDF rendering and terminal summary

pub mod charts;
pub mod error;
pub mod pdf;
pub mod summary;

pub use charts::*;
pub use error::*;
pub use pdf::*;
pub use summary::*;
