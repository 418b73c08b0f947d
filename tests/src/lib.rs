//! # Mycelix Auth Test Suite
//!
//! Unified test crate exercising the authorization subsystem end to end:
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Client-side signing fixtures
//! └── integration/
//!     ├── authorization_flow.rs   # Pipeline flows through the service
//!     └── gateway_http.rs         # Full HTTP round trips via the router
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mycelix-auth-tests
//! cargo test -p mycelix-auth-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod support;
