//! Track template parsing using cssparser.
//!
//! A template is a comma-separated list of track tokens, one per column or
//! row: `Fit` (content-sized), `<integer>px` (fixed), `*` (weight-1
//! proportional), or `<integer>*` (weighted proportional). The empty
//! template declares zero tracks.

use crate::types::TrackSize;
use cssparser::{Parser, ParserInput, Token};

/// Error produced when a track template string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateParseError {
    /// A comma-separated entry did not match the track grammar.
    UnrecognizedToken(String),
}

impl std::fmt::Display for TemplateParseError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedToken(token) => {
                write!(formatter, "unrecognized track template token {token:?}")
            }
        }
    }
}

impl std::error::Error for TemplateParseError {}

/// Parse a full track template into an ordered track list.
///
/// Parsing is pure: it is run once when a template is supplied, never per
/// layout pass.
///
/// # Errors
/// Returns [`TemplateParseError::UnrecognizedToken`] for any entry outside
/// the track grammar.
pub fn parse_track_template(template: &str) -> Result<Vec<TrackSize>, TemplateParseError> {
    let trimmed = template.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed.split(',').map(parse_track_size).collect()
}

/// Parse a single track token (one entry of a template).
///
/// Used on its own when re-sizing one row of an existing grid.
///
/// # Errors
/// Returns [`TemplateParseError::UnrecognizedToken`] when the input is not
/// exactly one track token.
pub fn parse_track_size(token: &str) -> Result<TrackSize, TemplateParseError> {
    let mut input = ParserInput::new(token);
    let mut parser = Parser::new(&mut input);

    let parsed = parse_track(&mut parser);
    if let Some(track) = parsed {
        if parser.is_exhausted() {
            return Ok(track);
        }
    }
    Err(TemplateParseError::UnrecognizedToken(
        token.trim().to_string(),
    ))
}

/// Intermediate shape of a track token after its first cssparser token.
enum FirstToken {
    Complete(TrackSize),
    /// A bare weight; the `*` delimiter must follow.
    Weight(u32),
    Invalid,
}

fn parse_track(parser: &mut Parser) -> Option<TrackSize> {
    let first = match parser.next() {
        Ok(Token::Ident(name)) if name.eq_ignore_ascii_case("fit") => {
            FirstToken::Complete(TrackSize::Fit)
        }
        Ok(Token::Dimension {
            int_value: Some(value),
            unit,
            ..
        }) if unit.eq_ignore_ascii_case("px") && *value >= 0 => {
            FirstToken::Complete(TrackSize::Fixed(*value))
        }
        Ok(Token::Delim('*')) => FirstToken::Complete(TrackSize::Proportional(1)),
        // Weights are strictly positive; `0*` is rejected.
        Ok(Token::Number {
            int_value: Some(value),
            ..
        }) if *value > 0 => FirstToken::Weight(*value as u32),
        Ok(_) | Err(_) => FirstToken::Invalid,
    };

    match first {
        FirstToken::Complete(track) => Some(track),
        FirstToken::Weight(weight) => match parser.next() {
            Ok(Token::Delim('*')) => Some(TrackSize::Proportional(weight)),
            Ok(_) | Err(_) => None,
        },
        FirstToken::Invalid => None,
    }
}
