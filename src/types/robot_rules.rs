use std::fmt;
use std::time::Duration;

use tracing::debug;

use super::rule::RuleEntry;
use crate::error::RobotsError;
use crate::normalize::{normalize, path_and_query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    AllowAll,
    AllowNone,
    AllowSome,
}

/// The effective rules for one crawler on one host.
///
/// Immutable once built; share it behind `Arc` across crawler threads.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotRules {
    access: Access,
    /// Sorted by specificity, longest first, `Allow` before `Disallow` on ties.
    rules: Vec<RuleEntry>,
    crawl_delay: Option<Duration>,
    sitemaps: Vec<String>,
    defer_visits: bool,
}

impl RobotRules {
    /// Everything is allowed.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::with_access(Access::AllowAll)
    }

    /// Nothing is allowed.
    #[must_use]
    pub fn disallow_all() -> Self {
        Self::with_access(Access::AllowNone)
    }

    fn with_access(access: Access) -> Self {
        Self {
            access,
            rules: Vec::new(),
            crawl_delay: None,
            sitemaps: Vec::new(),
            defer_visits: false,
        }
    }

    pub(crate) fn allow_some(
        rules: Vec<RuleEntry>,
        crawl_delay: Option<Duration>,
        sitemaps: Vec<String>,
    ) -> Self {
        Self {
            access: Access::AllowSome,
            rules,
            crawl_delay,
            sitemaps,
            defer_visits: false,
        }
    }

    #[must_use]
    pub(crate) fn with_sitemaps(mut self, sitemaps: Vec<String>) -> Self {
        self.sitemaps = sitemaps;
        self
    }

    /// Rules for a `robots.txt` fetch that did not succeed.
    ///
    /// Redirect loops (3xx) and server errors (5xx) disallow everything and ask
    /// the caller to defer visits; client errors (4xx) mean there is no
    /// `robots.txt`, so everything is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`RobotsError::NotAFailedFetch`] for any other status.
    pub fn from_status(status: u16) -> Result<Self, RobotsError> {
        let rules = match status {
            300..=399 | 500..=599 => Self {
                defer_visits: true,
                ..Self::disallow_all()
            },
            400..=499 => Self::allow_all(),
            _ => return Err(RobotsError::NotAFailedFetch { status }),
        };
        debug!(status, defer_visits = rules.defer_visits, "robots.txt fetch failed");
        Ok(rules)
    }

    /// Whether the crawler may fetch `url`.
    ///
    /// `url` may be an absolute URL or a path; only its path and query are
    /// consulted. `/robots.txt` itself is always allowed unless every path is
    /// disallowed.
    pub fn is_allowed(&self, url: &str) -> bool {
        match self.access {
            Access::AllowAll => true,
            Access::AllowNone => false,
            Access::AllowSome => {
                let path = path_and_query(url);
                if path == "/robots.txt" {
                    return true;
                }
                let path = normalize(&path);
                self.rules
                    .iter()
                    .find(|entry| entry.pattern.matches_normalized(&path))
                    .map_or(true, RuleEntry::is_allow)
            }
        }
    }

    pub fn crawl_delay(&self) -> Option<Duration> {
        self.crawl_delay
    }

    /// Sitemap URLs declared anywhere in the file, in order of appearance.
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Whether the caller should postpone crawling the host.
    pub fn is_defer_visits(&self) -> bool {
        self.defer_visits
    }

    /// Merged rules in precedence order. Empty unless some paths are disallowed.
    pub fn rules(&self) -> &[RuleEntry] {
        &self.rules
    }

    pub fn is_allow_all(&self) -> bool {
        self.access == Access::AllowAll
    }

    pub fn is_allow_none(&self) -> bool {
        self.access == Access::AllowNone
    }
}

impl Default for RobotRules {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl fmt::Display for RobotRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.access {
            Access::AllowAll => write!(f, "allow all")?,
            Access::AllowNone => write!(f, "allow none")?,
            Access::AllowSome => write!(f, "{} rules", self.rules.len())?,
        }
        if let Some(delay) = self.crawl_delay {
            write!(f, ", crawl-delay {}ms", delay.as_millis())?;
        }
        if !self.sitemaps.is_empty() {
            write!(f, ", {} sitemaps", self.sitemaps.len())?;
        }
        if self.defer_visits {
            write!(f, ", deferred")?;
        }
        Ok(())
    }
}
