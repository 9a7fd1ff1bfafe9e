//! Line Pump
//!
//! Reader loop that drains an async byte source into a [`LineBuffer`], one
//! byte at a time, and hands back each completed line. Overflow is counted
//! here since the buffer itself drops excess bytes silently.

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::parser::{LineBuffer, TERMINATOR};

const CHUNK_SIZE: usize = 512;

/// Bookkeeping for one completed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// 1-based line number
    pub number: usize,
    /// Data bytes received for the line, terminator excluded
    pub received: usize,
    /// `received` exceeded what the buffer could hold
    pub truncated: bool,
}

/// Totals over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub lines: usize,
    pub truncated_lines: usize,
    pub dropped_bytes: usize,
}

/// Streaming reader that yields completed lines from `R`
pub struct LinePump<'a, R> {
    reader: R,
    buffer: LineBuffer<'a>,
    chunk: Vec<u8>,
    pos: usize,
    filled: usize,
    eof: bool,
    received: usize,
    pending_reset: bool,
    stats: PumpStats,
}

impl<'a, R: AsyncRead + Unpin> LinePump<'a, R> {
    pub fn new(reader: R, buffer: LineBuffer<'a>) -> Self {
        Self {
            reader,
            buffer,
            chunk: vec![0; CHUNK_SIZE],
            pos: 0,
            filled: 0,
            eof: false,
            received: 0,
            pending_reset: false,
            stats: PumpStats::default(),
        }
    }

    /// Read until the next line completes.
    ///
    /// The line from the previous call is reset first, so the buffer returned
    /// by [`buffer`](Self::buffer) is valid until the next call. A trailing
    /// line without terminator is completed at end of input. Returns `None`
    /// once the input is exhausted.
    pub async fn next_line(&mut self) -> Result<Option<LineInfo>> {
        if self.pending_reset {
            self.buffer.reset();
            self.received = 0;
            self.pending_reset = false;
        }

        loop {
            if self.pos == self.filled {
                if self.eof {
                    return Ok(None);
                }

                let n = self
                    .reader
                    .read(&mut self.chunk)
                    .await
                    .context("Failed to read from input")?;
                if n == 0 {
                    self.eof = true;
                    if self.received == 0 {
                        return Ok(None);
                    }
                    log::debug!("Input ended without terminator, completing final line");
                    self.buffer.feed_char(TERMINATOR);
                    return Ok(Some(self.complete_line()));
                }

                self.pos = 0;
                self.filled = n;
            }

            let byte = self.chunk[self.pos];
            self.pos += 1;

            if self.buffer.feed_char(byte) {
                return Ok(Some(self.complete_line()));
            }
            self.received += 1;
        }
    }

    fn complete_line(&mut self) -> LineInfo {
        let dropped = self.received.saturating_sub(self.buffer.max_content());

        self.stats.lines += 1;
        if dropped > 0 {
            self.stats.truncated_lines += 1;
            self.stats.dropped_bytes += dropped;
        }
        self.pending_reset = true;

        LineInfo {
            number: self.stats.lines,
            received: self.received,
            truncated: dropped > 0,
        }
    }

    /// The line buffer, holding the most recently completed line
    pub fn buffer(&self) -> &LineBuffer<'a> {
        &self.buffer
    }

    pub fn stats(&self) -> PumpStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_yields_each_line() {
        let mut storage = [0u8; 32];
        let input: &[u8] = b"G1X1\nG0Y2\n";
        let mut pump = LinePump::new(input, LineBuffer::new(&mut storage));

        let first = pump.next_line().await.unwrap().expect("first line");
        assert_eq!(first.number, 1);
        assert_eq!(first.received, 4);
        assert!(!first.truncated);
        assert_eq!(pump.buffer().line(), b"G1X1");

        let second = pump.next_line().await.unwrap().expect("second line");
        assert_eq!(second.number, 2);
        assert_eq!(pump.buffer().line(), b"G0Y2");
        assert!(!pump.buffer().exists(b'X'));

        assert!(pump.next_line().await.unwrap().is_none());
        assert!(pump.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counts_dropped_bytes() {
        let mut storage = [0u8; 4];
        let input: &[u8] = b"X12345\nY1\n";
        let mut pump = LinePump::new(input, LineBuffer::new(&mut storage));

        let first = pump.next_line().await.unwrap().expect("first line");
        assert_eq!(first.received, 6);
        assert!(first.truncated);
        assert_eq!(pump.buffer().get(b'X'), 12.0);

        let second = pump.next_line().await.unwrap().expect("second line");
        assert!(!second.truncated);

        assert!(pump.next_line().await.unwrap().is_none());
        assert_eq!(
            pump.stats(),
            PumpStats {
                lines: 2,
                truncated_lines: 1,
                dropped_bytes: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_missing_newline_at_eof() {
        let mut storage = [0u8; 32];
        let input: &[u8] = b"G1X1\nG0X2";
        let mut pump = LinePump::new(input, LineBuffer::new(&mut storage));

        pump.next_line().await.unwrap().expect("first line");
        let last = pump.next_line().await.unwrap().expect("unterminated line");
        assert_eq!(last.number, 2);
        assert!(pump.buffer().is_complete());
        assert_eq!(pump.buffer().get(b'X'), 2.0);

        assert!(pump.next_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let mut storage = [0u8; 8];
        let input: &[u8] = b"";
        let mut pump = LinePump::new(input, LineBuffer::new(&mut storage));

        assert!(pump.next_line().await.unwrap().is_none());
        assert_eq!(pump.stats(), PumpStats::default());
    }

    #[tokio::test]
    async fn test_lines_longer_than_read_chunk() {
        let mut storage = [0u8; 16];
        let mut input = vec![b'X'];
        input.extend(std::iter::repeat_n(b'1', CHUNK_SIZE * 2));
        input.push(b'\n');
        let mut pump = LinePump::new(input.as_slice(), LineBuffer::new(&mut storage));

        let info = pump.next_line().await.unwrap().expect("long line");
        assert_eq!(info.received, CHUNK_SIZE * 2 + 1);
        assert!(info.truncated);
        assert_eq!(pump.buffer().line().len(), 15);
    }
}
