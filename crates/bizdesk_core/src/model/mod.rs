//! Domain model for feedback and dashboard data.
//!
//! # Responsibility
//! - Define the records owned by the notification center and loader.
//! - Decode backend stats payloads into typed rows.
//!
//! # Invariants
//! - Notification and confirmation identities are never reused.

pub mod confirmation;
pub mod notification;
pub mod stats;
