//! Domain layer: pure authorization logic, no I/O.

pub mod canonical;
pub mod capability;
pub mod config;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod freshness;
pub mod replay;
