//! Error types

mod api;
mod field;

pub use api::*;
pub use field::*;
