//! Canned scan source
//!
//! Replays a fixed list of frames with delays between them. Used by tests and
//! by `checkin --replay` to rehearse a session without a reader attached.

use crate::scanner::error::{ScanError, ScanResult};
use crate::scanner::traits::{DecodeCallback, DecodeSource};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// One emission: wait `delay`, then deliver `payload`
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub delay: Duration,
    pub payload: Option<String>,
}

impl Frame {
    pub fn new(delay: Duration, payload: Option<&str>) -> Self {
        Self {
            delay,
            payload: payload.map(str::to_string),
        }
    }
}

pub struct FixtureSource {
    frames: Vec<Frame>,
    name: String,
}

impl FixtureSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            name: "fixture".to_string(),
        }
    }

    /// One frame per code, `interval` apart
    pub fn from_codes<S: AsRef<str>>(codes: &[S], interval: Duration) -> Self {
        Self::new(
            codes
                .iter()
                .map(|c| Frame::new(interval, Some(c.as_ref())))
                .collect(),
        )
    }

    /// The same code emitted `count` times, as a camera does while it stays in view
    pub fn held_in_view(code: &str, count: usize, interval: Duration) -> Self {
        Self::new(vec![Frame::new(interval, Some(code)); count])
    }

    /// Parse a replay file: one code per line, `#` starts a comment line
    pub async fn from_replay_file(path: &Path, interval: Duration) -> ScanResult<Self> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ScanError::Replay {
                    path: path.display().to_string(),
                    message: format!("Cannot read replay file {}: {}", path.display(), e),
                })?;

        let codes: Vec<&str> = contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .collect();
        if codes.is_empty() {
            return Err(ScanError::Replay {
                path: path.display().to_string(),
                message: format!("Replay file {} contains no codes", path.display()),
            });
        }

        let mut source = Self::from_codes(&codes, interval);
        source.name = path.display().to_string();
        Ok(source)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

#[async_trait]
impl DecodeSource for FixtureSource {
    async fn on_decode(&mut self, mut callback: DecodeCallback) -> ScanResult<()> {
        for frame in &self.frames {
            if !frame.delay.is_zero() {
                tokio::time::sleep(frame.delay).await;
            }
            callback(frame.payload.clone());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
