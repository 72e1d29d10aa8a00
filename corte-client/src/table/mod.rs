//! Generic table engine
//!
//! Every listing screen of the tracker is the same machine: fetch rows,
//! cache them, filter by substring, sort by column with numeric-aware
//! comparison, select visible rows for bulk actions, and push the result at
//! a rendering sink. [`TableController`] owns that machine once; screens
//! supply a [`RowSource`], a [`TableRenderer`] and their column list.

mod controller;
mod render;
mod sort;
mod source;

pub use controller::*;
pub use render::*;
pub use sort::*;
pub use source::*;
