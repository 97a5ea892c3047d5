use regex::Regex;

use crate::codec;
use crate::types::{ObjectType, Reference, ReferenceKind};

/// Path segment that introduces a path-style reference. The matcher is
/// host-agnostic: the segment is located anywhere in the text, so schemes,
/// `www.` prefixes, and arbitrary hosts make no difference.
const PATH_SEGMENT: &str = "questions/";

/// One anchored regex per identifier alphabet. The two lexical passes stay
/// separate so the greedy-match and boundary rules are independently
/// auditable; neither run can swallow separators or punctuation.
struct TokenLexers {
    /// Maximal run of decimal digits (long-form candidates).
    digit_run: Regex,
    /// Maximal run of short-form symbols (short-form candidates).
    short_run: Regex,
}

impl TokenLexers {
    fn new() -> Self {
        Self {
            digit_run: Regex::new(r"\A[0-9]+").expect("valid regex"),
            short_run: Regex::new(&format!(r"\A[{}]+", codec::SHORT_ALPHABET))
                .expect("valid regex"),
        }
    }

    /// The id token at the start of `rest`: the longer of the two alphabet
    /// runs, empty when neither matches. The digit run wins ties, so an
    /// all-digit prefix is never misrouted to short-form decoding.
    fn lex_id_token<'a>(&self, rest: &'a str) -> &'a str {
        let digits = self.digit_run.find(rest).map_or("", |m| m.as_str());
        let short = self.short_run.find(rest).map_or("", |m| m.as_str());
        if digits.len() >= short.len() { digits } else { short }
    }
}

/// Extract every cross-reference occurrence from arbitrary text, in
/// ascending order of first character offset. Text with no qualifying
/// match yields an empty vector, never an error.
///
/// # Panics
///
/// Panics if a hardcoded token regex is invalid (compile-time invariant).
pub fn extract_references(text: &str) -> Vec<Reference> {
    let lexers = TokenLexers::new();

    let mut found: Vec<(usize, Reference)> = Vec::new();
    collect_path_matches(text, &lexers, &mut found);
    collect_hash_matches(text, &lexers, &mut found);

    // The two families are scanned independently; sorting by offset
    // restores document order.
    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, reference)| reference).collect()
}

/// Locate every `questions/` segment and assemble its reference, if any.
fn collect_path_matches(
    text: &str,
    lexers: &TokenLexers,
    found: &mut Vec<(usize, Reference)>,
) {
    for (offset, _) in text.match_indices(PATH_SEGMENT) {
        let rest = text.get(offset + PATH_SEGMENT.len()..).unwrap_or("");
        let Some(reference) = assemble_path_reference(rest, lexers) else {
            continue;
        };
        found.push((offset, reference));
    }
}

/// Locate every `#id` mention. A `#` with no token after it is not a
/// candidate at all.
fn collect_hash_matches(
    text: &str,
    lexers: &TokenLexers,
    found: &mut Vec<(usize, Reference)>,
) {
    for (offset, _) in text.match_indices('#') {
        let rest = text.get(offset + 1..).unwrap_or("");
        let token = lexers.lex_id_token(rest);
        if token.is_empty() {
            continue;
        }
        let Some(id) = codec::decode_identifier(token) else {
            continue;
        };
        let reference = match id.object_type {
            ObjectType::Question => Reference {
                answer_id: None,
                kind: ReferenceKind::Hash,
                question_id: Some(token.to_string()),
            },
            ObjectType::Answer => Reference {
                answer_id: Some(token.to_string()),
                kind: ReferenceKind::Hash,
                question_id: None,
            },
        };
        found.push((offset, reference));
    }
}

/// Build a reference from the text immediately after a path segment.
///
/// An invalid first token discards the whole candidate, second token or
/// not. A second token that fails to decode as an answer only costs the
/// answer position: the match is still emitted from the first token.
/// That silent partial acceptance is a deliberate leniency rule, kept as
/// an explicit branch here.
fn assemble_path_reference(rest: &str, lexers: &TokenLexers) -> Option<Reference> {
    let first = lexers.lex_id_token(rest);
    if first.is_empty() {
        return None;
    }
    let first_id = codec::decode_identifier(first)?;

    match first_id.object_type {
        ObjectType::Question => {
            let answer_id = second_token(rest, first.len(), lexers)
                .filter(|token| decodes_as_answer(token))
                .map(str::to_string);
            Some(Reference {
                answer_id,
                kind: ReferenceKind::Path,
                question_id: Some(first.to_string()),
            })
        },
        // A path can start with an answer-tagged id alone; any second
        // token is ignored.
        ObjectType::Answer => Some(Reference {
            answer_id: Some(first.to_string()),
            kind: ReferenceKind::Path,
            question_id: None,
        }),
    }
}

/// The optional second id token: present only when a `/` immediately
/// follows the first token and a token follows it.
fn second_token<'a>(rest: &'a str, first_len: usize, lexers: &TokenLexers) -> Option<&'a str> {
    let tail = rest.get(first_len..)?.strip_prefix('/')?;
    let token = lexers.lex_id_token(tail);
    if token.is_empty() { None } else { Some(token) }
}

/// Whether a token decodes as a valid answer id. A question-tagged or
/// invalid token in the answer position is simply not an answer.
fn decodes_as_answer(token: &str) -> bool {
    codec::decode_identifier(token)
        .is_some_and(|id| id.object_type == ObjectType::Answer)
}
