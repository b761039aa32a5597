use std::borrow::Cow;

use super::decode::Lines;
use super::directive::Directive;
use super::grammar;

/// Lazy sequence of `(line number, directive)` pairs over decoded text.
///
/// Line numbers are 1-based. Blank lines, comment-only lines and lines that
/// held nothing but HTML markup are skipped.
#[derive(Debug, Clone)]
pub struct Directives<'a> {
    lines: Lines<'a>,
    line_number: usize,
}

impl<'a> Directives<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: Lines::new(text),
            line_number: 0,
        }
    }
}

impl Iterator for Directives<'_> {
    type Item = (usize, Directive);

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let cleaned = clean_line(line);
            if cleaned.is_empty() {
                continue;
            }
            return Some((self.line_number, grammar::directive(&cleaned)));
        }
        None
    }
}

/// Drop the `#` comment, any HTML tags, and surrounding whitespace.
fn clean_line(line: &str) -> Cow<'_, str> {
    let line = match line.find('#') {
        Some(start) => &line[..start],
        None => line,
    };
    match strip_markup(line) {
        Cow::Borrowed(text) => Cow::Borrowed(text.trim()),
        Cow::Owned(text) => Cow::Owned(text.trim().to_owned()),
    }
}

/// Remove `<tag ...>`, `</tag>` and `<!...>` spans. A `<` not followed by a
/// letter, `/` or `!` is kept as text.
fn strip_markup(line: &str) -> Cow<'_, str> {
    if !line.contains('<') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let starts_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        match after.find('>') {
            Some(close) if starts_tag => {
                out.push_str(&rest[..open]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
