//! Identifier codec: the two id encodings and their validity rules.
//!
//! The long form is a fixed-width decimal string carrying an object-type
//! tag. The short form is a compact base-33 string over a lookalike-free
//! alphabet: a leading tag symbol from the letter range (so no short id
//! ever looks like a number), the sequence, and a position-weighted check
//! symbol, so a typo or an arbitrary word is distinguishable from a
//! genuine id without any lookup. Decoding is pure and total:
//! unparseable input is a normal `None`, never an error.

use crate::types::{Identifier, ObjectType};

/// Width of the long form: `1`, a 3-digit type code, a 13-digit sequence.
const LONG_FORM_LEN: usize = 17;

/// Long-form tag for question ids.
const QUESTION_TAG: &str = "1001";

/// Long-form tag for answer ids.
const ANSWER_TAG: &str = "1002";

/// Largest sequence representable in the 13-digit long-form payload.
const MAX_SEQUENCE: u64 = 9_999_999_999_999;

/// Short-form alphabet, case-sensitive. `0`, `L`, and `O` are excluded as
/// lookalikes, which keeps hand-typed short ids unambiguous. The scanner
/// derives its short-token lexical pass from this same constant.
pub(crate) const SHORT_ALPHABET: &str = "123456789ABCDEFGHIJKMNPQRSTUVWXYZ";

/// Base of the short-form positional encoding.
const SHORT_BASE: u64 = 33;

/// Index of the short-form tag symbol for questions (`D`).
const QUESTION_TAG_SYMBOL: u64 = 12;

/// Index of the short-form tag symbol for answers (`E`).
const ANSWER_TAG_SYMBOL: u64 = 13;

/// Fixed salt mixed into the short-form check symbol.
const CHECK_SALT: u64 = 37;

/// The sequence field is left-padded to this many symbols, never beyond.
const MIN_SEQUENCE_SYMBOLS: usize = 2;

/// Shortest well-formed short id: tag, two sequence symbols, check.
const MIN_SHORT_LEN: usize = 4;

/// Longest well-formed short id. Nine sequence symbols already cover
/// every sequence the long form can carry.
const MAX_SHORT_LEN: usize = 12;

/// Decode a candidate string into a validated identifier.
///
/// Returns `None` for anything the encoders could not have produced:
/// wrong width, foreign type tag, characters outside the alphabets, or a
/// failed check symbol. An all-digit candidate is only ever tried as long
/// form and everything else only as short form, so the two encodings
/// never compete for the same string.
pub fn decode_identifier(candidate: &str) -> Option<Identifier> {
    if candidate.is_empty() {
        return None;
    }
    if candidate.bytes().all(|b| b.is_ascii_digit()) {
        decode_long_form(candidate)
    } else {
        decode_short_form(candidate)
    }
}

/// Render the canonical long form of an identifier.
pub fn encode_long_form(object_type: ObjectType, sequence: u64) -> String {
    let tag = match object_type {
        ObjectType::Question => QUESTION_TAG,
        ObjectType::Answer => ANSWER_TAG,
    };
    return format!("{tag}{sequence:013}");
}

/// Render the short form of an identifier: tag symbol, base-33 sequence,
/// check symbol.
pub fn encode_short_form(object_type: ObjectType, sequence: u64) -> String {
    let tag = match object_type {
        ObjectType::Question => QUESTION_TAG_SYMBOL,
        ObjectType::Answer => ANSWER_TAG_SYMBOL,
    };

    let mut sequence_symbols = Vec::with_capacity(MAX_SHORT_LEN);
    let mut rest = sequence;
    loop {
        sequence_symbols.push(rest % SHORT_BASE);
        rest /= SHORT_BASE;
        if rest == 0 {
            break;
        }
    }
    while sequence_symbols.len() < MIN_SEQUENCE_SYMBOLS {
        sequence_symbols.push(0);
    }
    sequence_symbols.reverse();

    let mut symbols = Vec::with_capacity(MAX_SHORT_LEN);
    symbols.push(tag);
    symbols.extend(sequence_symbols);
    symbols.push(check_symbol_value(&symbols));
    symbols.into_iter().map(short_symbol).collect()
}

/// Exactly 17 digits with a recognized leading tag.
fn decode_long_form(digits: &str) -> Option<Identifier> {
    if digits.len() != LONG_FORM_LEN {
        return None;
    }
    let object_type = match digits.get(..QUESTION_TAG.len())? {
        QUESTION_TAG => ObjectType::Question,
        ANSWER_TAG => ObjectType::Answer,
        // Closed set: a numeric string of the right width with any other
        // tag is foreign, not a question and not an answer.
        _ => return None,
    };
    Some(Identifier {
        canonical_form: digits.to_string(),
        object_type,
    })
}

/// Tag symbol, base-33 sequence, check symbol.
fn decode_short_form(candidate: &str) -> Option<Identifier> {
    if candidate.len() < MIN_SHORT_LEN || candidate.len() > MAX_SHORT_LEN {
        return None;
    }

    let mut symbols = Vec::with_capacity(candidate.len());
    for c in candidate.chars() {
        symbols.push(short_symbol_value(c)?);
    }

    let (check, tagged) = symbols.split_last()?;
    if *check != check_symbol_value(tagged) {
        return None;
    }

    let (tag, sequence_symbols) = tagged.split_first()?;
    let object_type = match *tag {
        QUESTION_TAG_SYMBOL => ObjectType::Question,
        ANSWER_TAG_SYMBOL => ObjectType::Answer,
        _ => return None,
    };

    // Encoders left-pad the sequence only up to the two-symbol minimum;
    // anything wider with a leading zero symbol was never produced.
    if sequence_symbols.len() > MIN_SEQUENCE_SYMBOLS && sequence_symbols.first() == Some(&0) {
        return None;
    }

    let mut sequence: u64 = 0;
    for &symbol in sequence_symbols {
        sequence = sequence.checked_mul(SHORT_BASE)?.checked_add(symbol)?;
    }
    if sequence > MAX_SEQUENCE {
        return None;
    }

    Some(Identifier {
        canonical_form: encode_long_form(object_type, sequence),
        object_type,
    })
}

/// Position-weighted checksum over the tag and sequence symbols. The
/// weights make the check sensitive to both value and position, so
/// transcription errors anywhere in the id are caught.
fn check_symbol_value(symbols: &[u64]) -> u64 {
    let mut sum = CHECK_SALT;
    for (position, &symbol) in symbols.iter().enumerate() {
        let weight = u64::try_from(position).unwrap_or(0).saturating_add(1);
        sum = sum.saturating_add(weight.saturating_mul(symbol));
    }
    sum % SHORT_BASE
}

/// Position of a character in the short alphabet, if any.
fn short_symbol_value(c: char) -> Option<u64> {
    let position = SHORT_ALPHABET.chars().position(|a| a == c)?;
    u64::try_from(position).ok()
}

/// The alphabet symbol for a value already reduced below the base.
fn short_symbol(value: u64) -> char {
    let index = usize::try_from(value % SHORT_BASE).unwrap_or(0);
    SHORT_ALPHABET.chars().nth(index).unwrap_or('1')
}
