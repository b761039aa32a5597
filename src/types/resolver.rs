use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::agent::{prepare_agents, AgentMatcher, MatchMode, ProductTokenMatcher};
use super::robot_rules::RobotRules;
use super::ruleset::RuleSet;
use crate::error::RobotsError;

/// Crawl delays at or above this disallow the whole host.
pub const DEFAULT_MAX_CRAWL_DELAY: Duration = Duration::from_secs(3600);

/// Builder for a [`Resolver`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use robotrules::{MatchMode, ResolverBuilder, RuleSet};
///
/// let ruleset = RuleSet::parse(
///     "https://example.com/robots.txt",
///     b"User-agent: examplebot\nDisallow: /private/\nCrawl-delay: 2\n",
///     "text/plain",
/// );
/// let resolver = ResolverBuilder::new()
///     .match_mode(MatchMode::Exact)
///     .max_crawl_delay(Some(Duration::from_secs(60)))
///     .build();
///
/// let rules = resolver.evaluate(&ruleset, &["examplebot"]).unwrap();
/// assert!(!rules.is_allowed("https://example.com/private/index.html"));
/// assert_eq!(rules.crawl_delay(), Some(Duration::from_secs(2)));
/// ```
#[derive(Clone)]
pub struct ResolverBuilder {
    mode: MatchMode,
    max_crawl_delay: Option<Duration>,
    matcher: Option<Arc<dyn AgentMatcher>>,
}

impl ResolverBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Crawl delays at or above `max` turn the result into "allow none".
    /// `None` disables the check. Defaults to [`DEFAULT_MAX_CRAWL_DELAY`].
    #[must_use]
    pub fn max_crawl_delay(mut self, max: Option<Duration>) -> Self {
        self.max_crawl_delay = max;
        self
    }

    /// Replace the default [`ProductTokenMatcher`].
    #[must_use]
    pub fn agent_matcher(mut self, matcher: impl AgentMatcher + 'static) -> Self {
        let matcher: Arc<dyn AgentMatcher> = Arc::new(matcher);
        self.matcher = Some(matcher);
        self
    }

    #[must_use]
    pub fn build(self) -> Resolver {
        let matcher: Arc<dyn AgentMatcher> = match self.matcher {
            Some(matcher) => matcher,
            None => Arc::new(ProductTokenMatcher),
        };
        Resolver {
            mode: self.mode,
            max_crawl_delay: self.max_crawl_delay,
            matcher,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            max_crawl_delay: Some(DEFAULT_MAX_CRAWL_DELAY),
            matcher: None,
        }
    }
}

impl fmt::Debug for ResolverBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverBuilder")
            .field("mode", &self.mode)
            .field("max_crawl_delay", &self.max_crawl_delay)
            .field("custom_matcher", &self.matcher.is_some())
            .finish()
    }
}

/// Turns a parsed [`RuleSet`] into [`RobotRules`] for a crawler's identities.
///
/// Immutable and cheap to clone; one resolver can serve every host.
#[derive(Clone)]
pub struct Resolver {
    mode: MatchMode,
    max_crawl_delay: Option<Duration>,
    matcher: Arc<dyn AgentMatcher>,
}

impl Resolver {
    /// Select the groups addressing `agents` and merge them.
    ///
    /// An empty `agents` slice selects only `User-agent: *` groups.
    ///
    /// # Errors
    ///
    /// Returns [`RobotsError`] if an identity is empty, the wildcard, contains
    /// a control character or `#`, or is upper-case in [`MatchMode::Exact`].
    pub fn evaluate<S: AsRef<str>>(
        &self,
        ruleset: &RuleSet,
        agents: &[S],
    ) -> Result<RobotRules, RobotsError> {
        let agents = prepare_agents(agents, self.mode)?;
        Ok(crate::evaluate::evaluate(
            ruleset,
            &agents,
            self.mode,
            self.matcher.as_ref(),
            self.max_crawl_delay,
        ))
    }

    /// Parse a fetched body and evaluate it in one step.
    ///
    /// # Errors
    ///
    /// See [`evaluate()`](Self::evaluate).
    pub fn parse_content<S: AsRef<str>>(
        &self,
        robots_url: &str,
        content: &[u8],
        content_type: &str,
        agents: &[S],
    ) -> Result<RobotRules, RobotsError> {
        let ruleset = RuleSet::parse(robots_url, content, content_type);
        self.evaluate(&ruleset, agents)
    }

    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    pub fn max_crawl_delay(&self) -> Option<Duration> {
        self.max_crawl_delay
    }
}

impl Default for Resolver {
    fn default() -> Self {
        ResolverBuilder::default().build()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("mode", &self.mode)
            .field("max_crawl_delay", &self.max_crawl_delay)
            .finish_non_exhaustive()
    }
}
