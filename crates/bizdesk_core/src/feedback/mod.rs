//! Mapping of backend failures to user feedback.

pub mod api_error;
