use std::fmt;

/// One tokenized `robots.txt` line.
///
/// Tokenizing never fails: lines the grammar cannot place become
/// [`Directive::Unknown`], and recognised fields with unusable values
/// become [`Directive::Invalid`]. Both count as warnings downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    UserAgent(String),
    Allow(String),
    Disallow(String),
    /// Seconds, finite and non-negative.
    CrawlDelay(f64),
    Sitemap(String),
    /// A recognised non-standard field (`Host`, `Clean-param`, `ACAP-*`, ...).
    Extension { field: String, value: String },
    Unknown { field: String, value: String },
    Invalid { field: String, value: String },
}

impl Directive {
    pub(crate) fn unknown(line: &str) -> Self {
        match line.split_once(':') {
            Some((field, value)) => Directive::Unknown {
                field: field.trim().to_owned(),
                value: value.trim().to_owned(),
            },
            None => Directive::Unknown {
                field: line.to_owned(),
                value: String::new(),
            },
        }
    }

    pub(crate) fn invalid(field: &str, value: &str) -> Self {
        Directive::Invalid {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::UserAgent(agent) => write!(f, "User-agent: {agent}"),
            Directive::Allow(path) => write!(f, "Allow: {path}"),
            Directive::Disallow(path) => write!(f, "Disallow: {path}"),
            Directive::CrawlDelay(seconds) => write!(f, "Crawl-delay: {seconds}"),
            Directive::Sitemap(url) => write!(f, "Sitemap: {url}"),
            Directive::Extension { field, value }
            | Directive::Unknown { field, value }
            | Directive::Invalid { field, value } => write!(f, "{field}: {value}"),
        }
    }
}

/// Canonical field kinds a line can be tokenized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    UserAgent,
    Allow,
    Disallow,
    CrawlDelay,
    Sitemap,
    Extension,
    /// `http`/`https` before the first colon: a sitemap URL with no field name.
    BareUrl,
}

/// Accepted spellings, longest first within each field.
pub(crate) const FIELD_ALIASES: &[(&str, Field)] = &[
    ("user-agents", Field::UserAgent),
    ("user-agent", Field::UserAgent),
    ("user agent", Field::UserAgent),
    ("useg-agent", Field::UserAgent),
    ("useragent", Field::UserAgent),
    ("dissallow", Field::Disallow),
    ("disallaw", Field::Disallow),
    ("disallow", Field::Disallow),
    ("desallow", Field::Disallow),
    ("dissalow", Field::Disallow),
    ("disalow", Field::Disallow),
    ("allow", Field::Allow),
    ("crawl-delay", Field::CrawlDelay),
    ("crawl delay", Field::CrawlDelay),
    ("crawldelay", Field::CrawlDelay),
    ("site-map", Field::Sitemap),
    ("sitemap", Field::Sitemap),
    ("robot-version", Field::Extension),
    ("request-rate", Field::Extension),
    ("clean-param", Field::Extension),
    ("visit-time", Field::Extension),
    ("noindex", Field::Extension),
    ("comment", Field::Extension),
    ("host", Field::Extension),
];

const EXTENSION_PREFIX: &str = "acap-";

impl Field {
    /// Resolve a field name, tolerating case, `_` for `-`, and runs of whitespace.
    pub(crate) fn lookup(name: &str) -> Option<Field> {
        let key = canonical(name);
        if key.starts_with(EXTENSION_PREFIX) {
            return Some(Field::Extension);
        }
        if key == "http" || key == "https" {
            return Some(Field::BareUrl);
        }
        FIELD_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|&(_, field)| field)
    }
}

fn canonical(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
        .replace('_', "-")
}
