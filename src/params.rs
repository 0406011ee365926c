// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Path-parameter coercion.
//!
//! Every parameter arrives as a string and is coerced permissively: nothing
//! here rejects input. Malformed flags read as `false`, malformed ids become
//! [`None`] (a "NaN id") which never equals any stored id.

use crate::types::id::PostId;

/// `"true"` is true, everything else is false.
pub fn parse_flag(raw: &str) -> bool {
    raw == "true"
}

/// Like [`parse_flag`] but ignores case, so `"TRUE"` and `"True"` are true.
pub fn parse_flag_ignore_case(raw: &str) -> bool {
    raw.to_lowercase() == "true"
}

/// Integer coercion with `parseInt` rules.
///
/// Leading whitespace is skipped, then an optional sign. A `0x`/`0X` prefix
/// switches to base 16. The longest run of digits is consumed and anything
/// after it ignored (`"12abc"` is 12). No digits, or a value outside i64,
/// yields `None`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, s) = if s.starts_with("0x") || s.starts_with("0X") {
        (16, &s[2..])
    } else {
        (10, s)
    };

    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() {
        return None;
    }

    // Parse through i128 so `-9223372036854775808` is representable before negation.
    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

/// Coerces an id parameter. `None` is the NaN id.
pub fn parse_post_id(raw: &str) -> Option<PostId> {
    parse_int(raw).map(PostId)
}

/// Positional index into `posts`, accepted only in canonical array-index form.
///
/// `"0"` and `"12"` are indices; `"01"`, `"-1"`, `"+1"`, `" 1"` and `"1.0"`
/// are property names that no array element answers to.
pub fn parse_array_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return None;
    }
    let index: u64 = raw.parse().ok()?;
    // Largest valid array index is 2^32 - 2.
    if index >= u32::MAX as u64 {
        return None;
    }
    usize::try_from(index).ok()
}
