//! Shared settings and errors for the rolodex tools.

pub mod config;
pub mod constants;
pub mod error;
