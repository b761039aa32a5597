//! A fault-tolerant `robots.txt` rule engine.
//!
//! Parse a fetched body once into a [`RuleSet`], then resolve it for a
//! crawler's identities into [`RobotRules`], which answer
//! [`is_allowed()`](RobotRules::is_allowed) for URLs on that host.
//!
//! ```
//! use robotrules::RuleSet;
//!
//! let ruleset = RuleSet::parse(
//!     "https://example.com/robots.txt",
//!     b"User-agent: *\nDisallow: /*.php$\nAllow: /\n",
//!     "text/plain",
//! );
//! let rules = ruleset.evaluate(&["examplebot"]).unwrap();
//! assert!(!rules.is_allowed("https://example.com/index.php"));
//! assert!(rules.is_allowed("https://example.com/index.php?page=2"));
//! ```

mod compile;
mod error;
mod evaluate;
mod normalize;
pub mod parse;
mod types;

pub use error::RobotsError;
pub use types::{
    AgentMatcher, MatchMode, PathPattern, ProductTokenMatcher, Resolver, ResolverBuilder,
    RobotRules, RuleEntry, RuleGroup, RuleSet, DEFAULT_MAX_CRAWL_DELAY, sanitize_agent_names,
};
