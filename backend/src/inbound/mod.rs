//! Inbound adapters translating external requests into domain port calls.
//!
//! HTTP handlers live under [`http`]; framework details stay there.

pub mod http;
