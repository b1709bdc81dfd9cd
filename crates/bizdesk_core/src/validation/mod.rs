//! Client-side input validation.
//!
//! # Responsibility
//! - Validate national identifiers before any request is issued.
//! - Report form problems as values, never as panics.

pub mod forms;
pub mod tax_code;
