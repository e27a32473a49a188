//! Remote raffle API
//!
//! All persistence, drawing and business rules live behind the HTTP API;
//! this module only speaks its JSON.

pub(crate) mod client;
pub(crate) mod error;
pub(crate) mod traits;
pub(crate) mod types;

pub mod api;
