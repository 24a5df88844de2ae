//! Student identifier (matricula) normalization.
//!
//! Identifiers travel in two shapes:
//!
//! * the *display form*, always [`DISPLAY_WIDTH`] characters wide and padded
//!   on the left with `'0'`, which is what the listing page and API responses show;
//! * the *lookup form*, with the redundant leading zeros removed, which is what
//!   gets bound into store queries.
//!
//! Both conversions walk Unicode scalar values, never byte offsets, so an
//! identifier containing multi-byte characters is handled without panicking.

/// Width of the display form of an identifier.
pub const DISPLAY_WIDTH: usize = 8;

/// Remove the run of leading `'0'` characters from `id`.
///
/// Identifiers that do not start with `'0'` (including the empty string) are
/// returned unchanged. An identifier made only of zeros reduces to `""`.
pub fn strip_leading_zeros(id: &str) -> &str {
    if !id.starts_with('0') {
        return id;
    }

    let boundary = id
        .char_indices()
        .find(|&(_, c)| c != '0')
        .map(|(idx, _)| idx)
        .unwrap_or(id.len());

    &id[boundary..]
}

/// Whether `id` can be stored as a key: 1 to [`DISPLAY_WIDTH`] ASCII digits.
///
/// Identifiers are fixed-width numbers, so anything else (letters, signs,
/// exponents, over-wide values) would come back from the store reshaped.
pub fn is_storable_identifier(id: &str) -> bool {
    !id.is_empty() && id.len() <= DISPLAY_WIDTH && id.bytes().all(|b| b.is_ascii_digit())
}

/// Left-pad `id` with `'0'` until it is [`DISPLAY_WIDTH`] characters long.
///
/// Identifiers already at or beyond the display width are returned as-is.
pub fn pad_to_display(id: &str) -> String {
    let len = id.chars().count();
    if len >= DISPLAY_WIDTH {
        return id.to_string();
    }

    let mut padded = "0".repeat(DISPLAY_WIDTH - len);
    padded.push_str(id);
    padded
}
