/// Core domain types for extracted references and decoded identifiers.
use serde::Serialize;

/// Which object an identifier denotes, recovered from its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// An answer to a question.
    Answer,
    /// A question post.
    Question,
}

/// A validated identifier produced by the codec.
/// Only the codec constructs these; an `Identifier` always denotes a
/// well-formed id of a recognized object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The long numeric form, stable regardless of which surface
    /// encoding (long or short) was decoded.
    pub canonical_form: String,
    /// Object type recovered from the encoding's type tag.
    pub object_type: ObjectType,
}

/// Which surface syntax produced a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// A `#id` mention.
    Hash,
    /// A `questions/...` URL path, with or without scheme and host.
    Path,
}

/// One textual occurrence of a cross-reference.
/// At least one of `question_id`/`answer_id` is always set; the ids carry
/// the token exactly as it appeared in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Answer id as matched, when a valid answer identifier was recognized.
    pub answer_id: Option<String>,
    /// Surface syntax that produced this occurrence.
    pub kind: ReferenceKind,
    /// Question id as matched, when a valid question identifier was recognized.
    pub question_id: Option<String>,
}

impl Reference {
    /// The id a caller should use when it only needs one target.
    /// Prefers the question position; answer-only references fall back
    /// to the answer id.
    pub fn primary_id(&self) -> &str {
        return match (&self.question_id, &self.answer_id) {
            (Some(q), _) => q,
            (None, Some(a)) => a,
            (None, None) => "",
        };
    }
}
