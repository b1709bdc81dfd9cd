//! Transient feedback and blocking confirmations.
//!
//! # Responsibility
//! - Render auto-expiring notifications through a pluggable surface.
//! - Run confirm/cancel dialogs with exactly-once continuations.
//!
//! # Invariants
//! - Nothing in this module returns an error to callers.
//! - User text reaches HTML only through `markup::escape_html`.

pub mod center;
pub mod clock;
pub mod markup;
pub mod surface;
