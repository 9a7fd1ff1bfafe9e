//! Leading numeric prefix parsing
//!
//! Reads the longest decimal literal at the start of a byte slice and ignores
//! whatever follows it, so `10.5Y-2` yields `10.5`.

/// Parse the decimal literal at the start of `bytes`.
///
/// Accepts leading ASCII whitespace, an optional sign, digits and an optional
/// fractional part. Parsing stops at the first byte that cannot continue the
/// literal (the line sentinel included). Exponents are not recognised since
/// `E` is itself a field letter. Returns `0.0` when no digit is found.
pub fn parse_leading_number(bytes: &[u8]) -> f64 {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let rest = &bytes[start..];

    let mut end = 0;
    if matches!(rest.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_digits = count_digits(&rest[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if rest.get(end) == Some(&b'.') {
        frac_digits = count_digits(&rest[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    // The prefix is pure ASCII and matches the float grammar accepted by `str::parse`.
    std::str::from_utf8(&rest[..end])
        .ok()
        .and_then(|text| text.parse().ok())
        .unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
