mod agent;
mod pattern;
mod resolver;
mod robot_rules;
mod rule;
mod ruleset;

pub use agent::{sanitize_agent_names, AgentMatcher, MatchMode, ProductTokenMatcher};
pub use pattern::PathPattern;
pub use resolver::{Resolver, ResolverBuilder, DEFAULT_MAX_CRAWL_DELAY};
pub use robot_rules::RobotRules;
pub use rule::{RuleEntry, RuleGroup};
pub use ruleset::RuleSet;

pub(crate) use rule::CrawlDelay;
