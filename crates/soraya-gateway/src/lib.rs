//! soraya-gateway
//!
//! The submission gateway to the external Gail-model risk service:
//! request normalization from a form snapshot, a one-attempt HTTP
//! client, and the startup diagnostics endpoints. Exactly one attempt
//! per call — retry is a user decision, never an internal loop.

pub mod client;
pub mod error;
pub mod request;
