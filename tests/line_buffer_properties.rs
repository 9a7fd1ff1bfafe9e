//! Behavioural checks for the line buffer over whole input sequences
use gcode_fields::parser::{LineBuffer, LineState, SENTINEL, TERMINATOR};

fn feed(line: &mut LineBuffer<'_>, input: &[u8]) -> Vec<bool> {
    input.iter().map(|&c| line.feed_char(c)).collect()
}

#[test]
fn test_short_lines_keep_every_byte() {
    for capacity in [2usize, 8, 64] {
        for length in 0..capacity - 1 {
            let mut storage = vec![0u8; capacity];
            let mut line = LineBuffer::new(&mut storage);
            let data = vec![b'A'; length];

            let done = feed(&mut line, &data);
            assert!(done.iter().all(|d| !d));
            assert!(line.feed_char(TERMINATOR));

            assert_eq!(line.line().len(), length);
            assert_eq!(line.len(), length + 1);
        }
    }
}

#[test]
fn test_overflow_is_dropped_silently() {
    let capacity = 8;
    let mut storage = vec![0u8; capacity];
    let mut line = LineBuffer::new(&mut storage);

    for _ in 0..100 {
        assert!(!line.feed_char(b'9'));
        assert!(line.len() <= capacity - 1);
    }
    assert_eq!(line.line(), b"9999999");
}

#[test]
fn test_fresh_and_reset_buffers_have_no_fields() {
    let mut storage = [0u8; 16];
    let mut line = LineBuffer::new(&mut storage);

    for letter in b'A'..=b'Z' {
        assert!(!line.exists(letter));
    }

    feed(&mut line, b"ABCDEFGHIJKLMN\n");
    line.reset();
    for letter in b'A'..=b'Z' {
        assert!(!line.exists(letter));
        assert_eq!(line.get(letter), 0.0);
    }
}

#[test]
fn test_field_values() {
    let mut storage = [0u8; 32];
    let mut line = LineBuffer::new(&mut storage);
    feed(&mut line, b"X12.5Y-3\n");

    assert_eq!(line.get(b'X'), 12.5);
    assert_eq!(line.get(b'Y'), -3.0);
    assert!(!line.exists(b'Z'));
    assert_eq!(line.get(b'Z'), 0.0);
}

#[test]
fn test_leftover_bytes_not_scanned_after_reset() {
    let mut storage = [0u8; 32];
    let mut line = LineBuffer::new(&mut storage);

    feed(&mut line, b"G1\n");
    line.reset();
    feed(&mut line, b"G0\n");

    assert!(line.exists(b'G'));
    assert_eq!(line.get(b'G'), 0.0);
}

#[test]
fn test_queries_are_idempotent() {
    let mut storage = [0u8; 32];
    let mut line = LineBuffer::new(&mut storage);
    feed(&mut line, b"G1X7.25F300\n");

    let first: Vec<(bool, f64)> = b"GXYF".iter().map(|&l| (line.exists(l), line.get(l))).collect();
    for _ in 0..5 {
        let again: Vec<(bool, f64)> =
            b"GXYF".iter().map(|&l| (line.exists(l), line.get(l))).collect();
        assert_eq!(first, again);
    }
}

#[test]
fn test_exact_fit_at_capacity_boundary() {
    const N: usize = 6;
    let mut storage = [0xAAu8; N];
    {
        let mut line = LineBuffer::new(&mut storage);

        let done = feed(&mut line, b"X1234\n");
        assert_eq!(done, vec![false, false, false, false, false, true]);
        assert_eq!(line.line().len(), N - 1);
        assert_eq!(line.len(), N);
        assert_eq!(line.state(), LineState::Complete);
        assert_eq!(line.get(b'X'), 1234.0);
    }
    assert_eq!(storage, [b'X', b'1', b'2', b'3', b'4', SENTINEL]);
}

#[test]
fn test_caller_keeps_buffer_after_drop() {
    let mut storage = [0u8; 8];
    {
        let mut line = LineBuffer::new(&mut storage);
        feed(&mut line, b"S42\n");
    }
    assert_eq!(&storage[..4], b"S42\0");
}
