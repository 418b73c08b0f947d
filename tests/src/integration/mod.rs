//! Cross-crate integration tests.

mod authorization_flow;
mod gateway_http;
