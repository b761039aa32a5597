use proptest::prelude::*;
use robotrules::parse::{decode, directives, Directive};
use robotrules::{MatchMode, PathPattern, ResolverBuilder, RuleSet};

const ROBOTS_URL: &str = "https://www.example.com/robots.txt";

/// A line that looks like a directive often enough to reach the grammar.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (
            prop::sample::select(
                &["User-agent", "Disallow", "Allow", "Crawl-delay", "Sitemap", "Host", "Foo"][..]
            ),
            "[ -~]{0,16}",
        )
            .prop_map(|(field, value)| format!("{field}: {value}")),
        "[ -~]{0,24}",
        "\\PC{0,24}",
    ]
}

fn arb_body() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..16).prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// Parsing never panics on arbitrary bytes.
    #[test]
    fn parse_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let ruleset = RuleSet::parse(ROBOTS_URL, &bytes, "text/plain");
        let _ = ruleset.evaluate(&["anybot"]);
    }

    /// Evaluation never panics for directive-shaped input, in either mode.
    #[test]
    fn evaluate_never_panics(body in arb_body(), url in "\\PC{0,40}", agent in "[a-z]{1,8}") {
        let ruleset = RuleSet::parse(ROBOTS_URL, body.as_bytes(), "text/plain");
        for mode in [MatchMode::Exact, MatchMode::Prefix] {
            let resolver = ResolverBuilder::new().match_mode(mode).build();
            let rules = resolver.evaluate(&ruleset, &[agent.as_str()]).unwrap();
            let _ = rules.is_allowed(&url);
        }
    }

    /// Arbitrary patterns compile and match without panicking.
    #[test]
    fn pattern_never_panics(pattern in "\\PC{0,24}", path in "\\PC{0,24}") {
        let compiled = PathPattern::compile(&pattern);
        let _ = compiled.matches(&path);
        prop_assert_eq!(compiled.specificity(), pattern.trim().chars().count());
    }

    /// Every non-empty, comment-free line yields exactly one directive.
    #[test]
    fn one_directive_per_line(lines in prop::collection::vec("[a-zA-Z:/ ]{1,20}", 0..16)) {
        let text = lines.join("\n");
        let expected = lines.iter().filter(|line| !line.trim().is_empty()).count();
        prop_assert_eq!(directives(&text).count(), expected);
    }

    /// Allow and Disallow values round-trip through the tokenizer.
    #[test]
    fn rule_values_survive_tokenizing(value in "/[a-z0-9/._*$-]{0,16}", allow in any::<bool>()) {
        let field = if allow { "Allow" } else { "Disallow" };
        let text = format!("{field}: {value}");
        let (line, directive) = directives(&text).next().unwrap();
        prop_assert_eq!(line, 1);
        let expected = if allow {
            Directive::Allow(value.clone())
        } else {
            Directive::Disallow(value.clone())
        };
        prop_assert_eq!(directive, expected);
    }

    /// Decoding plain UTF-8 is the identity.
    #[test]
    fn decode_utf8_is_identity(text in "[^\u{FEFF}]{0,32}") {
        prop_assert_eq!(decode(text.as_bytes()), text);
    }
}
