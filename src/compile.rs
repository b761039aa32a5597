use tracing::debug;
use url::{ParseError, Url};

use crate::parse::{self, Directive};
use crate::types::{CrawlDelay, PathPattern, RuleEntry, RuleGroup, RuleSet};

pub(crate) fn compile(robots_url: &str, content: &[u8], content_type: &str) -> RuleSet {
    if !is_text(content_type) {
        debug!(robots_url, content_type, "ignoring robots.txt with non-text content type");
        return RuleSet {
            warnings: 1,
            ..RuleSet::default()
        };
    }

    let text = parse::decode(content);
    let mut builder = GroupBuilder::new(robots_url);
    for (line, directive) in parse::directives(&text) {
        builder.push(line, directive);
    }
    builder.finish()
}

fn is_text(content_type: &str) -> bool {
    let content_type = content_type.trim();
    content_type.is_empty()
        || content_type
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("text/"))
}

/// Folds directives into groups.
///
/// A group's header is its run of `User-agent` lines. Only `Allow` and
/// `Disallow` close the header; a `User-agent` after a closed header starts a
/// new group. `Crawl-delay` and `Sitemap` leave the header open.
struct GroupBuilder<'a> {
    robots_url: &'a str,
    base: Option<Url>,
    groups: Vec<RuleGroup>,
    current: Option<RuleGroup>,
    in_header: bool,
    sitemaps: Vec<String>,
    warnings: usize,
}

impl<'a> GroupBuilder<'a> {
    fn new(robots_url: &'a str) -> Self {
        Self {
            robots_url,
            base: Url::parse(robots_url).ok(),
            groups: Vec::new(),
            current: None,
            in_header: false,
            sitemaps: Vec::new(),
            warnings: 0,
        }
    }

    fn push(&mut self, line: usize, directive: Directive) {
        match directive {
            Directive::UserAgent(agent) => self.user_agent(line, &agent),
            Directive::Allow(pattern) => self.rule(line, &pattern, true),
            Directive::Disallow(pattern) => self.rule(line, &pattern, false),
            Directive::CrawlDelay(seconds) => self.crawl_delay(line, seconds),
            Directive::Sitemap(url) => self.sitemap(line, &url),
            Directive::Extension { .. } => {}
            Directive::Unknown { field, .. } => {
                self.warn(line, "unknown directive", &field);
            }
            Directive::Invalid { field, value } => {
                self.warn(line, "invalid value", &format!("{field}: {value}"));
            }
        }
    }

    fn user_agent(&mut self, line: usize, agent: &str) {
        let agent = agent.trim().to_lowercase();
        if agent.is_empty() {
            self.warn(line, "empty user-agent", "");
            return;
        }

        if !self.in_header {
            if let Some(group) = self.current.take() {
                self.groups.push(group);
            }
            self.in_header = true;
        }

        let group = self.current.get_or_insert_with(RuleGroup::default);
        if agent == "*" {
            group.wildcard = true;
        } else if !group.agents.contains(&agent) {
            group.agents.push(agent);
        }
    }

    fn rule(&mut self, line: usize, raw: &str, allow: bool) {
        if self.current.is_none() {
            self.warn(line, "rule outside of a user-agent group", raw);
            return;
        }
        self.in_header = false;

        let (pattern, malformed) = PathPattern::compile_checked(raw);
        if malformed {
            self.warn(line, "malformed percent-escape", raw);
        }
        // empty `Disallow:` allows everything
        let allow = allow || pattern.is_empty();
        if let Some(group) = self.current.as_mut() {
            group.rules.push(RuleEntry::new(pattern, allow));
        }
    }

    fn crawl_delay(&mut self, line: usize, seconds: f64) {
        match self.current.as_mut() {
            Some(group) => group.crawl_delays.push(CrawlDelay {
                seconds,
                agents_in_scope: group.agents.len(),
                wildcard_in_scope: group.wildcard,
            }),
            None => self.warn(line, "crawl-delay outside of a user-agent group", ""),
        }
    }

    fn sitemap(&mut self, line: usize, value: &str) {
        let resolved = match Url::parse(value) {
            Ok(_) => Some(value.to_owned()),
            Err(ParseError::RelativeUrlWithoutBase) => self
                .base
                .as_ref()
                .and_then(|base| base.join(value).ok())
                .map(String::from),
            Err(_) => None,
        };
        match resolved {
            Some(url) if !self.sitemaps.contains(&url) => self.sitemaps.push(url),
            Some(_) => {}
            None => self.warn(line, "unresolvable sitemap", value),
        }
    }

    fn warn(&mut self, line: usize, reason: &str, text: &str) {
        self.warnings += 1;
        debug!(robots_url = self.robots_url, line, reason, text, "skipping robots.txt line");
    }

    fn finish(mut self) -> RuleSet {
        if let Some(group) = self.current.take() {
            self.groups.push(group);
        }
        debug!(
            robots_url = self.robots_url,
            groups = self.groups.len(),
            sitemaps = self.sitemaps.len(),
            warnings = self.warnings,
            "parsed robots.txt"
        );
        RuleSet {
            groups: self.groups,
            sitemaps: self.sitemaps,
            warnings: self.warnings,
        }
    }
}
