//! Scanner capability

use crate::scanner::error::ScanResult;
use async_trait::async_trait;

/// Receives every decoded payload; `None` models a frame with no readable value
pub type DecodeCallback = Box<dyn FnMut(Option<String>) + Send>;

/// A source of decoded QR payloads (camera, keyboard-wedge reader, fixture)
///
/// Sources emit every frame they decode, including the same code many times
/// in a row while it stays in view. De-duplication is the consumer's job.
#[async_trait]
pub trait DecodeSource: Send {
    /// Drive decoded payloads into `callback` until the source is exhausted.
    ///
    /// May be called again after it returns to restart the source.
    async fn on_decode(&mut self, callback: DecodeCallback) -> ScanResult<()>;

    /// Short label for logs
    fn name(&self) -> &str;
}
