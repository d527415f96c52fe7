//! Field schema declarations and their registration-time validation.

pub mod types;
pub mod validator;

pub use types::*;
pub use validator::*;
