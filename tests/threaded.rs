use std::sync::Arc;
use std::thread;

use robotrules::{MatchMode, ResolverBuilder, RobotRules, RuleSet};

const ROBOTS_TXT: &[u8] = b"User-agent: *\n\
    Disallow: /private/\n\
    Crawl-delay: 2\n\
    \n\
    User-agent: foobot\n\
    Disallow: /\n\
    Allow: /public/\n\
    \n\
    User-agent: barbot\n\
    Disallow: /*.php$\n\
    \n\
    Sitemap: /sitemap.xml\n";

#[test]
fn evaluate_across_threads() {
    let ruleset = Arc::new(RuleSet::parse(
        "https://www.example.com/robots.txt",
        ROBOTS_TXT,
        "text/plain",
    ));

    let mut handles = vec![];

    // Thread 1: named group with an allowed subtree
    let rs = Arc::clone(&ruleset);
    handles.push(thread::spawn(move || {
        let rules = rs.evaluate(&["foobot"]).unwrap();
        (
            rules.is_allowed("https://www.example.com/public/index.html"),
            rules.is_allowed("https://www.example.com/private/index.html"),
        )
    }));

    // Thread 2: anchored extension rule
    let rs = Arc::clone(&ruleset);
    handles.push(thread::spawn(move || {
        let rules = rs.evaluate(&["barbot"]).unwrap();
        (
            rules.is_allowed("https://www.example.com/index.php?x=1"),
            rules.is_allowed("https://www.example.com/index.php"),
        )
    }));

    // Thread 3: wildcard fallback
    let rs = Arc::clone(&ruleset);
    handles.push(thread::spawn(move || {
        let rules = rs.evaluate(&["anybot"]).unwrap();
        (
            rules.is_allowed("https://www.example.com/public/index.html"),
            rules.is_allowed("https://www.example.com/private/index.html"),
        )
    }));

    // Thread 4: prefix matching on a full User-Agent header
    let rs = Arc::clone(&ruleset);
    handles.push(thread::spawn(move || {
        let resolver = ResolverBuilder::new().match_mode(MatchMode::Prefix).build();
        let rules = resolver
            .evaluate(&rs, &["Mozilla/5.0 (compatible; foobot/2.1)"])
            .unwrap();
        (
            rules.is_allowed("https://www.example.com/public/index.html"),
            rules.is_allowed("https://www.example.com/index.html"),
        )
    }));

    let results: Vec<(bool, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], (true, false));
    assert_eq!(results[1], (true, false));
    assert_eq!(results[2], (true, false));
    assert_eq!(results[3], (true, false));
}

#[test]
fn shared_rules_answer_consistently() {
    let ruleset = RuleSet::parse("https://www.example.com/robots.txt", ROBOTS_TXT, "text/plain");
    let rules: Arc<RobotRules> = Arc::new(ruleset.evaluate(&["anybot"]).unwrap());
    let expected = rules.is_allowed("https://www.example.com/private/a.html");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                (0..1000).all(|n| {
                    let private = format!("https://www.example.com/private/{i}-{n}.html");
                    let public = format!("https://www.example.com/public/{i}-{n}.html");
                    !rules.is_allowed(&private) && rules.is_allowed(&public)
                })
            })
        })
        .collect();

    assert!(!expected);
    for h in handles {
        assert!(h.join().unwrap());
    }
    assert_eq!(rules.sitemaps(), ["https://www.example.com/sitemap.xml"]);
}

#[test]
fn resolver_is_shared_between_threads() {
    let resolver = Arc::new(ResolverBuilder::new().build());

    let handles: Vec<_> = ["foobot", "barbot", "bazbot"]
        .into_iter()
        .map(|agent| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || {
                let rules = resolver
                    .parse_content(
                        "https://www.example.com/robots.txt",
                        ROBOTS_TXT,
                        "text/plain",
                        &[agent],
                    )
                    .unwrap();
                rules.is_allowed("https://www.example.com/index.html")
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, [false, true, true]);
}
