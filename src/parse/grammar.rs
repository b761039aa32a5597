use winnow::ascii::{float, space0, space1, Caseless};
use winnow::combinator::{eof, terminated};
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::token::{literal, rest, take_till};

use super::directive::{Directive, Field, FIELD_ALIASES};

// -- Field and value --------------------------------------------------------

/// `field: value`, split on the first colon.
fn field_and_value<'i>(input: &mut &'i str) -> ModalResult<(&'i str, &'i str)> {
    let field = take_till(1.., ':').parse_next(input)?;
    ':'.parse_next(input)?;
    space0.parse_next(input)?;
    let value = rest.parse_next(input)?;
    Ok((field, value.trim_end()))
}

/// A known field name followed by whitespace, for lines missing their colon.
fn bare_field<'i>(input: &mut &'i str) -> ModalResult<(Field, &'i str, &'i str)> {
    let start = input.checkpoint();
    for &(alias, field) in FIELD_ALIASES {
        let name: ModalResult<&str> =
            terminated(literal(Caseless(alias)), space1).parse_next(input);
        if let Ok(name) = name {
            let value = rest.parse_next(input)?;
            return Ok((field, name, value.trim_end()));
        }
        input.reset(&start);
    }
    Err(ErrMode::from_input(input))
}

// -- Values -----------------------------------------------------------------

fn delay_seconds(input: &mut &str) -> ModalResult<f64> {
    terminated(float, eof).parse_next(input)
}

fn crawl_delay(value: &str) -> Option<f64> {
    let mut input = value;
    delay_seconds
        .parse_next(&mut input)
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
}

// -- Lines ------------------------------------------------------------------

fn build(field: Field, name: &str, value: &str, line: &str) -> Directive {
    match field {
        Field::UserAgent => Directive::UserAgent(value.to_owned()),
        Field::Allow | Field::Disallow if value.contains(char::REPLACEMENT_CHARACTER) => {
            Directive::invalid(name, value)
        }
        Field::Allow => Directive::Allow(value.to_owned()),
        Field::Disallow => Directive::Disallow(value.to_owned()),
        Field::CrawlDelay => match crawl_delay(value) {
            Some(seconds) => Directive::CrawlDelay(seconds),
            None => Directive::invalid(name, value),
        },
        Field::Sitemap if value.is_empty() => Directive::invalid(name, value),
        Field::Sitemap => Directive::Sitemap(value.to_owned()),
        Field::Extension => Directive::Extension {
            field: name.trim().to_owned(),
            value: value.to_owned(),
        },
        Field::BareUrl if value.starts_with("//") => Directive::Sitemap(line.to_owned()),
        Field::BareUrl => Directive::unknown(line),
    }
}

/// Tokenize one comment-free, trimmed, non-empty line.
pub(crate) fn directive(line: &str) -> Directive {
    let mut input = line;
    if let Ok((name, value)) = field_and_value.parse_next(&mut input) {
        if let Some(field) = Field::lookup(name) {
            return build(field, name, value, line);
        }
    }

    let mut input = line;
    if let Ok((field, name, value)) = bare_field.parse_next(&mut input) {
        return build(field, name, value, line);
    }

    Directive::unknown(line)
}
