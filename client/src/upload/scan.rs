//! Parsing of whitespace-separated values and `n7`-style references found in
//! element text and attributes.

use std::str::FromStr;

use vml_shared::{Ordinal, ORDINAL_MAX};

/// Parse the first `N` whitespace-separated values of `text`. Anything after
/// them is ignored.
pub(crate) fn array<T: FromStr + Copy + Default, const N: usize>(text: &str) -> Option<[T; N]> {
    let mut output = [T::default(); N];
    let mut tokens = text.split_whitespace();
    for slot in output.iter_mut() {
        *slot = tokens.next()?.parse().ok()?;
    }
    Some(output)
}

/// Parse exactly the first `count` values of `text`.
pub(crate) fn exactly<T: FromStr>(text: &str, count: usize) -> Option<Vec<T>> {
    let values: Vec<T> = text
        .split_whitespace()
        .take(count)
        .map(|token| token.parse().ok())
        .collect::<Option<Vec<T>>>()?;
    (values.len() == count).then_some(values)
}

/// Parse values from the start of `text` until one fails or `max` are read.
pub(crate) fn leading<T: FromStr>(text: &str, max: usize) -> Vec<T> {
    text.split_whitespace()
        .map_while(|token| token.parse().ok())
        .take(max)
        .collect()
}

pub(crate) fn number<T: FromStr>(text: &str) -> Option<T> {
    text.split_whitespace().next()?.parse().ok()
}

/// An index followed by `N` values, as in a vertex line `"3 0.5 1.0 -2"`.
pub(crate) fn indexed<T: FromStr + Copy + Default, const N: usize>(
    text: &str,
) -> Option<(u32, [T; N])> {
    let text = text.trim_start();
    let split = text.find(char::is_whitespace).unwrap_or(text.len());
    let index = text[..split].parse().ok()?;
    Some((index, array(&text[split..])?))
}

/// The run of decimal digits at the start of `text`, as in the `3` of `3d`.
pub(crate) fn leading_digits(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

/// Ordinal of a reference such as `n7` (entity), `f3` (fragment) or `b2`
/// (bone). Ordinals above [`ORDINAL_MAX`] are rejected.
pub(crate) fn ordinal(text: &str, prefix: char) -> Option<Ordinal> {
    let rest = text.trim().strip_prefix(prefix)?;
    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    leading_digits(rest).filter(|ordinal| *ordinal <= ORDINAL_MAX)
}

/// Split `text` into pieces of at most `size` bytes, never inside a UTF-8
/// sequence. Yields each piece with its byte offset.
pub(crate) fn chunks(text: &str, size: usize) -> Vec<(usize, &str)> {
    let mut output = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + size).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // size is smaller than this character; emit it whole
            end = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
        output.push((start, &text[start..end]));
        start = end;
    }
    output
}
