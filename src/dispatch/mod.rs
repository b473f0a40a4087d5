//! Dispatch module - emailing the rendered report

pub mod error;
pub mod message;
pub mod smtp;

pub use error::*;
pub use message::*;
pub use smtp::*;
