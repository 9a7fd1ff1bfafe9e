//! Incremental line buffer
//!
//! Collects a byte stream into one line at a time inside a caller-owned
//! region and answers field queries (`X`, `Y`, `F`...) against it.
//! Nothing here allocates, errors or logs.

use super::number::parse_leading_number;

/// Byte that ends a line in the input stream.
pub const TERMINATOR: u8 = b'\n';

/// Byte written in place of the terminator once a line is complete.
pub const SENTINEL: u8 = 0;

/// Whether the buffer is still collecting or holds a finished line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// Collecting bytes; queries see the partial line.
    Filling,
    /// A terminator was fed and replaced by [`SENTINEL`].
    Complete,
}

/// Fixed-capacity line buffer over a borrowed byte region.
///
/// One byte of the region is always kept free for the sentinel, so a
/// buffer of capacity `N` holds at most `N - 1` content bytes. Bytes that do
/// not fit are dropped silently; callers that need to detect overflow count
/// fed bytes themselves (see [`crate::stream::LinePump`]).
///
/// The buffer is not reset automatically after a line completes. Call
/// [`LineBuffer::reset`] once the line has been consumed.
///
/// ```
/// use gcode_fields::parser::LineBuffer;
///
/// let mut storage = [0u8; 32];
/// let mut line = LineBuffer::new(&mut storage);
///
/// let done: Vec<bool> = b"G1X10.5Y-2\n".iter().map(|&c| line.feed_char(c)).collect();
/// assert_eq!(done.last(), Some(&true));
/// assert_eq!(line.get(b'X'), 10.5);
/// assert!(!line.exists(b'Z'));
/// line.reset();
/// ```
#[derive(Debug)]
pub struct LineBuffer<'a> {
    buf: &'a mut [u8],
    len: usize,
    state: LineState,
}

impl<'a> LineBuffer<'a> {
    /// Bind a line buffer to `buf`; its length is the capacity.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            state: LineState::Filling,
        }
    }

    /// Feed one byte. Returns `true` only when `c` is the terminator.
    ///
    /// The terminator is stored as [`SENTINEL`] at the cursor and counted in
    /// [`len`](Self::len). Any other byte is appended while fewer than
    /// `capacity - 1` bytes are stored, and dropped otherwise.
    pub fn feed_char(&mut self, c: u8) -> bool {
        if c == TERMINATOR {
            // Only reachable without room when terminators repeat without a reset.
            if let Some(slot) = self.buf.get_mut(self.len) {
                *slot = SENTINEL;
                self.len += 1;
            }
            self.state = LineState::Complete;
            return true;
        }

        if self.len < self.max_content() {
            self.buf[self.len] = c;
            self.len += 1;
        }
        self.state = LineState::Filling;
        false
    }

    /// Whether `letter` occurs among the stored bytes.
    pub fn exists(&self, letter: u8) -> bool {
        self.as_bytes().contains(&letter)
    }

    /// Value of the first `letter` field, or `0.0` if `letter` is absent.
    ///
    /// An absent field and a literal zero look the same here; check
    /// [`exists`](Self::exists) first when the difference matters.
    pub fn get(&self, letter: u8) -> f64 {
        let bytes = self.as_bytes();
        match bytes.iter().position(|&b| b == letter) {
            Some(idx) => parse_leading_number(&bytes[idx + 1..]),
            None => 0.0,
        }
    }

    /// Start a new line. Stored bytes are left in place but no longer scanned.
    pub fn reset(&mut self) {
        self.len = 0;
        self.state = LineState::Filling;
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Stored byte count, including the sentinel of a completed line.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == LineState::Complete
    }

    /// Raw stored bytes, sentinel included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Line content without the trailing sentinel of a completed line.
    pub fn line(&self) -> &[u8] {
        let bytes = self.as_bytes();
        match (self.state, bytes.split_last()) {
            (LineState::Complete, Some((&SENTINEL, content))) => content,
            _ => bytes,
        }
    }

    /// Largest number of content bytes the region can hold.
    pub fn max_content(&self) -> usize {
        self.capacity().saturating_sub(1)
    }
}
