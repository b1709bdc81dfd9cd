//! Dashboard statistics loading.
//!
//! # Responsibility
//! - Fetch revenue and cost aggregates for the selected period.
//! - Drop results of superseded queries instead of rendering them.
//!
//! # See also
//! - `notify` for the feedback posted after each load.

pub mod loader;
pub mod snapshot;
pub mod source;
pub mod token;
