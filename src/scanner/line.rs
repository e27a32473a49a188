//! Line-oriented scan source
//!
//! Keyboard-wedge QR readers type the decoded value followed by Enter, so a
//! scanner attached to the terminal shows up as lines on stdin.

use crate::scanner::error::ScanResult;
use crate::scanner::traits::{DecodeCallback, DecodeSource};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

pub struct LineSource<R> {
    reader: BufReader<R>,
    name: String,
}

impl<R: AsyncRead + Unpin + Send> LineSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader: BufReader::new(reader),
            name: name.into(),
        }
    }
}

impl LineSource<tokio::io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin(), "stdin")
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> DecodeSource for LineSource<R> {
    async fn on_decode(&mut self, mut callback: DecodeCallback) -> ScanResult<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                log::debug!("Scan source '{}' reached end of input", self.name);
                return Ok(());
            }
            let code = line.trim_end_matches(['\n', '\r']);
            log::trace!("Scan source '{}' decoded {:?}", self.name, code);
            callback(Some(code.to_string()));
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (DecodeCallback, Arc<Mutex<Vec<Option<String>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: DecodeCallback = Box::new(move |code| sink.lock().unwrap().push(code));
        (callback, seen)
    }

    #[tokio::test]
    async fn test_lines_are_delivered_without_terminators() {
        let input: &[u8] = b"42\r\n43\n\nabc";
        let mut source = LineSource::new(input, "test");
        let (callback, seen) = recorder();

        source.on_decode(callback).await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                Some("42".to_string()),
                Some("43".to_string()),
                Some(String::new()),
                Some("abc".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_repeated_codes_are_not_deduplicated() {
        let input: &[u8] = b"42\n42\n42\n";
        let mut source = LineSource::new(input, "test");
        let (callback, seen) = recorder();

        source.on_decode(callback).await.unwrap();

        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_restart_after_end_of_input_returns_immediately() {
        let input: &[u8] = b"42\n";
        let mut source = LineSource::new(input, "test");
        let (first, _) = recorder();
        source.on_decode(first).await.unwrap();

        let (second, seen) = recorder();
        source.on_decode(second).await.unwrap();
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(source.name(), "test");
    }
}
