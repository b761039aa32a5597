mod decode;
mod directive;
mod grammar;
mod parser;

pub use decode::decode;
pub use directive::Directive;
pub use parser::Directives;

/// Tokenize decoded `robots.txt` text into directives, lazily.
///
/// Never fails; see [`Directive`] for how unusable lines are reported.
pub fn directives(text: &str) -> Directives<'_> {
    Directives::new(text)
}
