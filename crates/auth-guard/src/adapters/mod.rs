//! Adapters layer: concrete implementations of outbound ports.

pub mod memory_store;
