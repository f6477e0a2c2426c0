//! Case-insensitive string comparison
//!
//! Brand, part and display-name comparisons throughout LabelKit are
//! case-insensitive over the full Unicode range, while ids are compared
//! byte for byte. These helpers implement the former.

use std::cmp::Ordering;

fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Compare two strings after Unicode case folding.
pub fn utf8_casecmp(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b))
}

/// True if the strings are equal ignoring case.
pub fn utf8_eq(a: &str, b: &str) -> bool {
    utf8_casecmp(a, b) == Ordering::Equal
}

/// Natural ordering for part names.
///
/// Both strings are case folded and split into runs of ASCII digits and
/// runs of everything else. Digit runs compare by numeric value, so
/// "Avery 5160" sorts before "Avery 15160".
pub fn part_name_cmp(a: &str, b: &str) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut rest_a = a.as_str();
    let mut rest_b = b.as_str();

    loop {
        let (chunk_a, num_a, tail_a) = next_chunk(rest_a);
        let (chunk_b, num_b, tail_b) = next_chunk(rest_b);

        if chunk_a.is_empty() && chunk_b.is_empty() {
            return Ordering::Equal;
        }

        let ord = if num_a && num_b {
            compare_digits(chunk_a, chunk_b)
        } else {
            chunk_a.cmp(chunk_b)
        };

        if ord != Ordering::Equal {
            return ord;
        }

        rest_a = tail_a;
        rest_b = tail_b;
    }
}

/// Returns (chunk, is_numeric, remainder).
fn next_chunk(s: &str) -> (&str, bool, &str) {
    let numeric = s.starts_with(|c: char| c.is_ascii_digit());
    let end = s
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit() != numeric)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (&s[..end], numeric, &s[end..])
}

// Compares digit strings by value without overflowing on long runs.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
