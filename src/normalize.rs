//! Percent-escape normalization shared by pattern compilation and matching.
//!
//! Pattern literals and candidate paths go through the same transformation so
//! they can be compared byte-for-byte:
//!
//! - escapes of unreserved characters (`A-Z a-z 0-9 - . _ ~`) are decoded,
//! - every other escape is kept, with upper-case hex digits,
//! - `*` and `$` are escaped, so they can only ever match literally,
//! - non-ASCII bytes, controls and space are escaped,
//! - a `%` that does not start a valid escape becomes `%25`.

use std::borrow::Cow;

use url::Url;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Normalize `input`, borrowing when nothing needs rewriting.
pub(crate) fn normalize(input: &str) -> Cow<'_, str> {
    normalize_checked(input).0
}

/// Like [`normalize`], also reporting whether a malformed escape was found.
pub(crate) fn normalize_checked(input: &str) -> (Cow<'_, str>, bool) {
    if input.bytes().all(is_plain) {
        return (Cow::Borrowed(input), false);
    }

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len() + 8);
    let mut malformed = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                let decoded = (hi << 4) | lo;
                if is_unreserved(decoded) {
                    out.push(char::from(decoded));
                } else {
                    push_escape(&mut out, decoded);
                }
                i += 3;
                continue;
            }
            malformed = true;
            push_escape(&mut out, b'%');
        } else if is_plain(b) {
            out.push(char::from(b));
        } else {
            // `*`, `$`, space, controls and each byte of a multi-byte character
            push_escape(&mut out, b);
        }
        i += 1;
    }

    (Cow::Owned(out), malformed)
}

/// Reduce a full URL to its path and query. Strings starting with `/` are
/// already a path; anything that is not a hierarchical absolute URL (for
/// example `Talk:Foo`) is treated as a path.
pub(crate) fn path_and_query(target: &str) -> Cow<'_, str> {
    if target.starts_with('/') {
        let path = target.split('#').next().unwrap_or(target);
        return Cow::Borrowed(path);
    }

    match Url::parse(target) {
        Ok(url) if !url.cannot_be_a_base() => {
            let mut path = url.path().to_owned();
            if path.is_empty() {
                path.push('/');
            }
            if let Some(query) = url.query() {
                path.push('?');
                path.push_str(query);
            }
            Cow::Owned(path)
        }
        _ => Cow::Owned(format!("/{target}")),
    }
}

fn is_plain(b: u8) -> bool {
    b.is_ascii_graphic() && !matches!(b, b'%' | b'*' | b'$')
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn push_escape(out: &mut String, b: u8) {
    out.push('%');
    out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
    out.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
}
