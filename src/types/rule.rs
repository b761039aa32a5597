use std::fmt;

use super::pattern::PathPattern;

/// One `Allow` or `Disallow` line, compiled.
///
/// An empty `Disallow:` is stored as an allowing entry with an empty
/// pattern, so it matches everything at the lowest possible specificity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub(crate) pattern: PathPattern,
    pub(crate) allow: bool,
}

impl RuleEntry {
    pub fn new(pattern: PathPattern, allow: bool) -> Self {
        Self { pattern, allow }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn is_allow(&self) -> bool {
        self.allow
    }

    pub fn specificity(&self) -> usize {
        self.pattern.specificity()
    }
}

impl fmt::Display for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.allow { "Allow" } else { "Disallow" };
        write!(f, "{kind}: {}", self.pattern)
    }
}

/// A `Crawl-delay` line together with the agents declared before it in its
/// group. Only those agents (and the wildcard, if it came first) pick it up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CrawlDelay {
    pub(crate) seconds: f64,
    pub(crate) agents_in_scope: usize,
    pub(crate) wildcard_in_scope: bool,
}

/// A block of `User-agent` lines followed by the rules that apply to them.
///
/// Agent tokens are stored lower-cased and deduplicated. `User-agent: *` is
/// not stored as a token; it sets [`is_wildcard()`](Self::is_wildcard).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleGroup {
    pub(crate) agents: Vec<String>,
    pub(crate) wildcard: bool,
    pub(crate) rules: Vec<RuleEntry>,
    pub(crate) crawl_delays: Vec<CrawlDelay>,
}

impl RuleGroup {
    /// Declared agent tokens in file order, without the wildcard.
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Rules in file order.
    pub fn rules(&self) -> &[RuleEntry] {
        &self.rules
    }

    /// The first crawl delay declared in this group, in seconds.
    pub fn crawl_delay(&self) -> Option<f64> {
        self.crawl_delays.first().map(|delay| delay.seconds)
    }

    /// Agent tokens declared before the `Crawl-delay` at `delay`.
    pub(crate) fn scope_of(&self, delay: &CrawlDelay) -> &[String] {
        &self.agents[..delay.agents_in_scope]
    }
}
