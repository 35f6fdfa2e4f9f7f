//! Response parsing: locate the JSON payload in free-form model output.
//!
//! Generation APIs do not guarantee clean JSON. Depending on the model and
//! the day, the résumé arrives wrapped in a ```` ```json ```` fence, preceded
//! by a chatty sentence, followed by stray backticks, or bare. Instead of one
//! heuristic with special cases, the parser tries an ordered list of
//! [`JsonLocator`] strategies and decodes the first candidate substring one of
//! them returns.
//!
//! ## Strategy order
//!
//! 1. [`JsonLocator::FencedJson`] — text between the first opening
//!    ```` ```json ```` marker and the last closing ```` ``` ````.
//! 2. [`JsonLocator::FirstBrace`] — from the first `{` to the end, with
//!    trailing backticks stripped.
//! 3. [`JsonLocator::WholeText`] — the trimmed response as-is.
//!
//! Only the first match is decoded. A response that locates but does not
//! decode is a [`ResumeError::Decode`] carrying the raw text; it never yields a
//! partially filled record.

use crate::error::{Outcome, ResumeError};
use crate::record::CandidateRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Opening fence. Tolerates ```` ```JSON ```` and ```` ``` json ````.
static RE_OPENING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```[ \t]*json").unwrap());

const CLOSING_FENCE: &str = "```";

/// One way of carving a JSON candidate out of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLocator {
    FencedJson,
    FirstBrace,
    WholeText,
}

/// Strategies in the order they are tried.
pub const DEFAULT_LOCATORS: [JsonLocator; 3] = [
    JsonLocator::FencedJson,
    JsonLocator::FirstBrace,
    JsonLocator::WholeText,
];

impl JsonLocator {
    /// Return the candidate substring, or `None` when this strategy does not
    /// apply to `text`. `text` is expected to be trimmed already.
    pub fn locate(self, text: &str) -> Option<&str> {
        match self {
            JsonLocator::FencedJson => {
                let open = RE_OPENING_FENCE.find(text)?;
                let close = text.rfind(CLOSING_FENCE)?;
                if open.end() <= close {
                    Some(text[open.end()..close].trim())
                } else {
                    None
                }
            }
            JsonLocator::FirstBrace => {
                let start = text.find('{')?;
                Some(text[start..].trim_end_matches(|c: char| c == '`' || c.is_whitespace()))
            }
            JsonLocator::WholeText => Some(text),
        }
    }
}

/// Run `locators` in order and return the first match with the strategy that
/// produced it.
pub fn locate_json<'a>(text: &'a str, locators: &[JsonLocator]) -> Option<(JsonLocator, &'a str)> {
    locators
        .iter()
        .find_map(|&locator| locator.locate(text).map(|candidate| (locator, candidate)))
}

/// Decode a model response into a [`CandidateRecord`].
///
/// # Errors
/// [`ResumeError::Decode`] when no strategy yields a substring, or the chosen
/// substring is not a JSON object matching the record's shape. The error embeds
/// the decoder message and the untrimmed response.
pub fn parse_response(raw: &str) -> Outcome<CandidateRecord> {
    let trimmed = raw.trim();

    let Some((locator, candidate)) = locate_json(trimmed, &DEFAULT_LOCATORS) else {
        return Err(ResumeError::Decode {
            message: "no JSON payload found".to_string(),
            raw: raw.to_string(),
        });
    };
    debug!("Located JSON via {:?} ({} bytes)", locator, candidate.len());

    serde_json::from_str(candidate).map_err(|e| ResumeError::Decode {
        message: e.to_string(),
        raw: raw.to_string(),
    })
}
