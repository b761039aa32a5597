use crate::error::RobotsError;

/// How crawler identities are compared with declared `User-agent` tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// RFC 9309: an identity matches a token equal to it, or whose leading
    /// product token (`[a-z0-9_-]+`) equals it. Identities must be lower-case.
    #[default]
    Exact,
    /// Legacy: accepts every [`Exact`](Self::Exact) match. In addition a
    /// declared token is split into words, and a word matches when it
    /// equals the identity, equals the identity's product token, or occurs in
    /// the identity between non-alphanumeric boundaries.
    Prefix,
}

/// Decides whether a group's declared agent tokens address the crawler.
///
/// Both slices are lower-case; `declared` never contains the wildcard.
/// Closures of the same shape implement this trait, which makes one-off
/// overrides easy:
///
/// ```
/// use robotrules::{MatchMode, ResolverBuilder};
///
/// let resolver = ResolverBuilder::new()
///     .agent_matcher(|agents: &[String], declared: &[String], _: MatchMode| {
///         declared.iter().any(|token| agents.iter().any(|a| token.starts_with(a.as_str())))
///     })
///     .build();
/// # let _ = resolver;
/// ```
pub trait AgentMatcher: Send + Sync {
    fn matches(&self, agents: &[String], declared: &[String], mode: MatchMode) -> bool;
}

impl<F> AgentMatcher for F
where
    F: Fn(&[String], &[String], MatchMode) -> bool + Send + Sync,
{
    fn matches(&self, agents: &[String], declared: &[String], mode: MatchMode) -> bool {
        self(agents, declared, mode)
    }
}

/// The standard matcher for both [`MatchMode`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductTokenMatcher;

impl AgentMatcher for ProductTokenMatcher {
    fn matches(&self, agents: &[String], declared: &[String], mode: MatchMode) -> bool {
        agents.iter().any(|agent| {
            declared.iter().any(|token| match mode {
                MatchMode::Exact => exact_match(agent, token),
                MatchMode::Prefix => prefix_match(agent, token),
            })
        })
    }
}

fn exact_match(agent: &str, token: &str) -> bool {
    agent == token || agent == product_token(token)
}

fn prefix_match(agent: &str, token: &str) -> bool {
    if exact_match(agent, token) {
        return true;
    }
    token
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty() && *word != "*")
        .any(|word| agent == word || product_token(agent) == word || contains_word(agent, word))
}

/// Leading run of `[a-z0-9_-]`, e.g. `googlebot` in `googlebot-news/2.1`.
pub(crate) fn product_token(name: &str) -> &str {
    let end = name
        .find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'))
        .unwrap_or(name.len());
    &name[..end]
}

/// `needle` occurs in `haystack` with no alphanumeric character on either side.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Validate identities for evaluation, lower-casing them in [`MatchMode::Prefix`].
///
/// # Errors
///
/// Returns [`RobotsError`] for an empty name, the wildcard, a name containing
/// a control character or `#`, or (in [`MatchMode::Exact`]) an upper-case name.
pub(crate) fn prepare_agents<S: AsRef<str>>(
    agents: &[S],
    mode: MatchMode,
) -> Result<Vec<String>, RobotsError> {
    agents
        .iter()
        .map(|agent| {
            let name = check_name(agent.as_ref())?;
            if mode == MatchMode::Exact && name.chars().any(char::is_uppercase) {
                return Err(RobotsError::UppercaseAgentName {
                    name: name.to_owned(),
                });
            }
            Ok(name.to_lowercase())
        })
        .collect()
}

/// Trim, lower-case and deduplicate crawler names, keeping first-seen order.
///
/// # Errors
///
/// Returns [`RobotsError`] if any name is empty, the wildcard, or contains a
/// control character or `#`.
///
/// ```
/// use robotrules::sanitize_agent_names;
///
/// let names = sanitize_agent_names([" FooBot ", "foobot", "BarBot/1.0"]).unwrap();
/// assert_eq!(names, ["foobot", "barbot/1.0"]);
/// ```
pub fn sanitize_agent_names<I, S>(names: I) -> Result<Vec<String>, RobotsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sanitized: Vec<String> = Vec::new();
    for name in names {
        let name = check_name(name.as_ref())?.to_lowercase();
        if !sanitized.contains(&name) {
            sanitized.push(name);
        }
    }
    Ok(sanitized)
}

fn check_name(raw: &str) -> Result<&str, RobotsError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RobotsError::EmptyAgentName);
    }
    if name == "*" {
        return Err(RobotsError::WildcardAgentName);
    }
    if let Some(ch) = name.chars().find(|&c| c.is_control() || c == '#') {
        return Err(RobotsError::IllegalAgentName {
            name: name.to_owned(),
            ch,
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    fn exact(agents: &[&str], declared: &[&str]) -> bool {
        ProductTokenMatcher.matches(&names(agents), &names(declared), MatchMode::Exact)
    }

    fn prefix(agents: &[&str], declared: &[&str]) -> bool {
        ProductTokenMatcher.matches(&names(agents), &names(declared), MatchMode::Prefix)
    }

    #[test]
    fn product_token_extraction() {
        assert_eq!(product_token("googlebot-news/2.1"), "googlebot-news");
        assert_eq!(product_token("my_bot"), "my_bot");
        assert_eq!(product_token("mozilla/5.0 (compatible)"), "mozilla");
        assert_eq!(product_token("/x"), "");
    }

    #[test]
    fn exact_mode() {
        assert!(exact(&["googlebot"], &["googlebot"]));
        assert!(exact(&["googlebot"], &["googlebot/2.1"]));
        assert!(!exact(&["googlebot"], &["googlebot-news"]));
        assert!(!exact(&["google"], &["googlebot"]));
        assert!(exact(&["foo", "bar"], &["baz", "bar"]));
    }

    #[test]
    fn prefix_mode_words() {
        assert!(prefix(&["agent2"], &["agent2 agent3"]));
        assert!(prefix(&["agent3"], &["agent2 agent3"]));
        assert!(prefix(&["agent4"], &["agent1, agent4"]));
        assert!(!prefix(&["agent5"], &["agent2 agent3"]));
    }

    #[test]
    fn prefix_mode_product_token_of_identity() {
        assert!(prefix(&["unhipbot/0.1"], &["unhipbot"]));
        assert!(prefix(&["googlebot/2.1"], &["googlebot"]));
    }

    #[test]
    fn prefix_mode_bounded_substring() {
        assert!(prefix(&["mozilla allowbot1 99.9"], &["allowbot1"]));
        assert!(!prefix(&["mozilla allowbot12 99.9"], &["allowbot1"]));
        assert!(!prefix(&["mozilla anonbot 99.9"], &["denybot"]));
    }

    #[test]
    fn prefix_mode_accepts_everything_exact_does() {
        assert!(prefix(&["foo"], &["foo/1.2"]));
        assert!(prefix(&["googlebot"], &["googlebot/2.1 (+http://www.google.com/bot.html)"]));
        assert!(prefix(&["download ninja"], &["download ninja"]));
        assert!(!prefix(&["foo"], &["foobar/1.2"]));
    }

    #[test]
    fn prefix_mode_ignores_wildcard_words() {
        assert!(!prefix(&["anybot"], &["* foo"]));
    }

    #[test]
    fn closures_are_matchers() {
        let matcher = |agents: &[String], declared: &[String], _: MatchMode| {
            agents == declared
        };
        assert!(matcher.matches(&names(&["x"]), &names(&["x"]), MatchMode::Exact));
    }

    #[test]
    fn prepare_rejects_bad_names() {
        assert_eq!(
            prepare_agents(&["", "foo"], MatchMode::Exact),
            Err(RobotsError::EmptyAgentName)
        );
        assert_eq!(
            prepare_agents(&["*"], MatchMode::Prefix),
            Err(RobotsError::WildcardAgentName)
        );
        assert_eq!(
            prepare_agents(&["FooBot"], MatchMode::Exact),
            Err(RobotsError::UppercaseAgentName {
                name: "FooBot".into()
            })
        );
        assert_eq!(
            prepare_agents(&["foo#bar"], MatchMode::Exact),
            Err(RobotsError::IllegalAgentName {
                name: "foo#bar".into(),
                ch: '#'
            })
        );
    }

    #[test]
    fn prepare_lowercases_in_prefix_mode() {
        assert_eq!(
            prepare_agents(&["Mozilla Bot/1.0"], MatchMode::Prefix).unwrap(),
            ["mozilla bot/1.0"]
        );
    }

    #[test]
    fn sanitize_dedupes_in_order() {
        assert_eq!(
            sanitize_agent_names(["FOOBOT", "barbot", " foobot "]).unwrap(),
            ["foobot", "barbot"]
        );
    }

    #[test]
    fn sanitize_rejects_wildcard_and_empty() {
        assert_eq!(
            sanitize_agent_names(["foobot", "*"]),
            Err(RobotsError::WildcardAgentName)
        );
        assert_eq!(
            sanitize_agent_names(["  "]),
            Err(RobotsError::EmptyAgentName)
        );
    }

    #[test]
    fn sanitize_empty_input() {
        let none: [&str; 0] = [];
        assert!(sanitize_agent_names(none).unwrap().is_empty());
    }
}
