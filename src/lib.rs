//! Administrative client for raffle events
//!
//! The centre of the crate is [`checkin`], which turns a stream of scanned
//! QR payloads into attendance marks against the remote API.

pub mod app;
pub mod checkin;
pub mod core;
pub mod remote;
pub mod report;
pub mod scanner;
