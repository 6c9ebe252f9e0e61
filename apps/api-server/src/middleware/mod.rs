//! Middleware and request-level plumbing.

pub mod cors;
pub mod error;
