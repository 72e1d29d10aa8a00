//! REST surface of the tracker backend
//!
//! Listings come back either as a bare JSON array of rows or wrapped in a
//! `{ "dados": [...], "pagination": {...} }` envelope; mutations are JSON
//! POST/PUT/DELETE calls answered with `{ "success": bool, "message": str }`.
//! [`endpoints`] holds one typed wrapper per backend route.

mod action;
mod endpoints;
mod listing;

pub use action::*;
pub use endpoints::*;
pub use listing::*;
