//! Corte tracker client library
//!
//! An async Rust client for the Corte inventory / cutting-operations tracker
//! backend, plus the headless table engine (cache, sort, filter, selection,
//! rendering seam) that every listing screen of the tracker shares.

pub mod api;
pub mod error;
pub mod model;
pub mod notify;
pub mod prefs;
pub mod session;
pub mod table;

mod client;

pub use client::*;
