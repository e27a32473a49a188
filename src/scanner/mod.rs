//! Scan sources
//!
//! Everything that can produce decoded QR payloads sits behind the
//! `DecodeSource` capability so a check-in session is driven identically by
//! a reader on stdin, a replay file, or a test fixture.

pub mod error;
pub mod fixture;
pub mod line;
pub mod traits;

pub use error::{ScanError, ScanResult};
pub use fixture::{FixtureSource, Frame};
pub use line::LineSource;
pub use traits::{DecodeCallback, DecodeSource};
