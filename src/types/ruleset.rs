use std::fmt;

use super::resolver::Resolver;
use super::robot_rules::RobotRules;
use super::rule::RuleGroup;
use crate::error::RobotsError;

/// A parsed `robots.txt`: every group in file order plus the sitemap URLs.
///
/// Parsing never fails. Lines that cannot be used are skipped and counted in
/// [`warnings()`](Self::warnings). A `RuleSet` holds no per-crawler state, so
/// one parse can be evaluated for any number of crawlers.
///
/// # Example
///
/// ```
/// use robotrules::RuleSet;
///
/// let ruleset = RuleSet::parse(
///     "https://example.com/robots.txt",
///     b"User-agent: *\nDisallow: /cgi-bin/\nSitemap: /sitemap.xml\n",
///     "text/plain",
/// );
/// assert_eq!(ruleset.groups().len(), 1);
/// assert_eq!(ruleset.sitemaps(), ["https://example.com/sitemap.xml"]);
///
/// let rules = ruleset.evaluate(&["examplebot"]).unwrap();
/// assert!(!rules.is_allowed("https://example.com/cgi-bin/run"));
/// assert!(rules.is_allowed("https://example.com/index.html"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub(crate) groups: Vec<RuleGroup>,
    pub(crate) sitemaps: Vec<String>,
    pub(crate) warnings: usize,
}

impl RuleSet {
    /// Parse a fetched `robots.txt` body.
    ///
    /// `robots_url` is the URL the body was fetched from and is used to resolve
    /// relative sitemap URLs. `content_type` may be empty; anything other than
    /// `text/*` yields an empty ruleset with one warning.
    #[must_use]
    pub fn parse(robots_url: &str, content: &[u8], content_type: &str) -> Self {
        crate::compile::compile(robots_url, content, content_type)
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Sitemap URLs in order of first appearance, without duplicates.
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Number of lines that were skipped or repaired while parsing.
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.sitemaps.is_empty()
    }

    /// Evaluate with a default [`Resolver`]: exact matching and a one hour
    /// crawl-delay ceiling.
    ///
    /// # Errors
    ///
    /// See [`Resolver::evaluate()`].
    pub fn evaluate<S: AsRef<str>>(&self, agents: &[S]) -> Result<RobotRules, RobotsError> {
        Resolver::default().evaluate(self, agents)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} groups, {} sitemaps, {} warnings",
            self.groups.len(),
            self.sitemaps.len(),
            self.warnings
        )
    }
}
