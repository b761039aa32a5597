use std::time::Duration;

use tracing::{debug, trace};

use crate::types::{AgentMatcher, MatchMode, RobotRules, RuleEntry, RuleGroup, RuleSet};

/// Groups that address the crawler, and whether they were reached only
/// through the `*` fallback.
struct Selection<'a> {
    groups: Vec<&'a RuleGroup>,
    by_wildcard: bool,
}

pub(crate) fn evaluate(
    ruleset: &RuleSet,
    agents: &[String],
    mode: MatchMode,
    matcher: &dyn AgentMatcher,
    max_crawl_delay: Option<Duration>,
) -> RobotRules {
    let selection = select_groups(&ruleset.groups, agents, mode, matcher);
    trace!(
        ?agents,
        groups = selection.groups.len(),
        by_wildcard = selection.by_wildcard,
        "selected robots.txt groups"
    );

    if selection.groups.is_empty() {
        return RobotRules::allow_all().with_sitemaps(ruleset.sitemaps.clone());
    }

    let crawl_delay = crawl_delay(&selection, agents, mode, matcher);
    if let (Some(delay), Some(max)) = (crawl_delay, max_crawl_delay) {
        if delay >= max {
            debug!(
                delay_ms = delay.as_millis() as u64,
                max_ms = max.as_millis() as u64,
                "crawl-delay exceeds maximum; disallowing all"
            );
            return RobotRules::disallow_all().with_sitemaps(ruleset.sitemaps.clone());
        }
    }

    RobotRules::allow_some(
        merge_rules(&selection.groups),
        crawl_delay,
        ruleset.sitemaps.clone(),
    )
}

fn select_groups<'a>(
    groups: &'a [RuleGroup],
    agents: &[String],
    mode: MatchMode,
    matcher: &dyn AgentMatcher,
) -> Selection<'a> {
    let named: Vec<&RuleGroup> = if agents.is_empty() {
        Vec::new()
    } else {
        groups
            .iter()
            .filter(|group| !group.agents.is_empty() && matcher.matches(agents, &group.agents, mode))
            .collect()
    };

    if !named.is_empty() {
        return Selection {
            groups: named,
            by_wildcard: false,
        };
    }

    Selection {
        groups: groups.iter().filter(|group| group.wildcard).collect(),
        by_wildcard: true,
    }
}

/// All entries of the selected groups, longest pattern first. `Allow` wins a
/// tie in length; otherwise file order is kept.
fn merge_rules(groups: &[&RuleGroup]) -> Vec<RuleEntry> {
    let mut entries: Vec<RuleEntry> = groups
        .iter()
        .flat_map(|group| group.rules.iter().cloned())
        .collect();
    entries.sort_by(|a, b| {
        b.specificity()
            .cmp(&a.specificity())
            .then(b.allow.cmp(&a.allow))
    });
    entries
}

/// First `Crawl-delay` in the selected groups whose scope covers the crawler.
fn crawl_delay(
    selection: &Selection<'_>,
    agents: &[String],
    mode: MatchMode,
    matcher: &dyn AgentMatcher,
) -> Option<Duration> {
    selection
        .groups
        .iter()
        .flat_map(|group| group.crawl_delays.iter().map(move |delay| (*group, delay)))
        .find(|(group, delay)| {
            if selection.by_wildcard {
                delay.wildcard_in_scope
            } else {
                matcher.matches(agents, group.scope_of(delay), mode)
            }
        })
        .map(|(_, delay)| Duration::from_millis((delay.seconds * 1000.0).round() as u64))
}
