use std::borrow::Cow;
use std::fmt;

use crate::normalize::{normalize, normalize_checked};

/// A compiled `Allow`/`Disallow` path pattern.
///
/// `*` matches any run of characters and a trailing `$` anchors the pattern
/// to the end of the path. Everything else matches literally after percent
/// normalization, so `/%7Ejim` and `/~jim` are the same pattern.
///
/// Patterns are split on `*` into literal segments at compile time; matching
/// is then a prefix check on the first segment followed by leftmost searches,
/// which never backtracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    literals: Vec<String>,
    anchored: bool,
    specificity: usize,
}

impl PathPattern {
    /// Compile a raw directive value. Leading and trailing whitespace is ignored.
    pub fn compile(raw: &str) -> Self {
        Self::compile_checked(raw).0
    }

    /// Compile, also reporting whether the value held a malformed `%` escape.
    pub(crate) fn compile_checked(raw: &str) -> (Self, bool) {
        let source = raw.trim();
        let specificity = source.chars().count();

        let (body, anchored) = match source.strip_suffix('$') {
            Some(body) => (body, true),
            None => (source, false),
        };

        let body: Cow<'_, str> = if body.is_empty() || body.starts_with(['/', '*']) {
            Cow::Borrowed(body)
        } else {
            Cow::Owned(format!("/{body}"))
        };

        let mut malformed = false;
        let literals = if body.is_empty() {
            Vec::new()
        } else {
            body.split('*')
                .map(|segment| {
                    let (literal, bad_escape) = normalize_checked(segment);
                    malformed |= bad_escape;
                    literal.into_owned()
                })
                .collect()
        };

        let pattern = Self {
            source: source.to_owned(),
            literals,
            anchored,
            specificity,
        };
        (pattern, malformed)
    }

    /// The trimmed directive value this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of characters in the trimmed source. Longer patterns win.
    pub fn specificity(&self) -> usize {
        self.specificity
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// True for the empty pattern, which matches every path.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Whether `path` (path plus optional query) is matched by this pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.matches_normalized(&normalize(path))
    }

    /// Match against a path that has already been normalized.
    pub(crate) fn matches_normalized(&self, path: &str) -> bool {
        let Some((first, rest_literals)) = self.literals.split_first() else {
            // `""` matches everything; `"$"` only the empty path
            return !self.anchored || path.is_empty();
        };
        let Some(mut rest) = path.strip_prefix(first.as_str()) else {
            return false;
        };
        let Some((last, middle)) = rest_literals.split_last() else {
            return !self.anchored || rest.is_empty();
        };

        for literal in middle {
            match rest.find(literal.as_str()) {
                Some(pos) => rest = &rest[pos + literal.len()..],
                None => return false,
            }
        }

        if self.anchored {
            rest.ends_with(last.as_str())
        } else {
            rest.contains(last.as_str())
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
