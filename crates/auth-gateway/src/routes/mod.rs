//! Route handlers.

pub mod admin;
pub mod claims;
pub mod songs;
