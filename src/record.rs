//! Token records produced by the server.
//!
//! A response frame flattens every sentence into one stream of tab-delimited
//! lines; the client reconstructs sentence boundaries from the server's
//! token numbering, which restarts at 1 for each new sentence.

use serde::Serialize;

/// Width of the records a session produces.
///
/// Fixed at session construction (the server's `returnall` setting decides
/// which columns it sends); never inferred from individual lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordShape {
    /// token number, word, lemma, morphology, part of speech
    #[default]
    Short,
    /// Short plus confidence, named entity, chunk, head token, dependency
    Extended,
}

/// One entry of the output sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Sentence separator: inserted before every sentence after the first.
    /// All fields absent; still counts toward the sequence length.
    Boundary,
    Token(Token),
}

impl Record {
    /// The server-reported surface form, if this entry carries one.
    pub fn word(&self) -> Option<&str> {
        match self {
            Record::Boundary => None,
            Record::Token(token) => Some(&token.word),
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, Record::Boundary)
    }
}

/// One analyzed token.
///
/// `word`, `lemma`, `morph` and `pos` are always present; `annotations` is
/// populated only for [`RecordShape::Extended`] sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// 1-based index assigned by the server, restarting per sentence.
    pub token_number: u32,
    pub word: String,
    pub lemma: String,
    pub morph: String,
    pub pos: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

/// Extended analysis columns.
///
/// The server may truncate the row after any column, so every field is
/// individually optional; a field that is present must parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Annotations {
    pub confidence: Option<f64>,
    pub named_entity: Option<String>,
    pub chunk: Option<String>,
    pub head: Option<u32>,
    pub dependency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_has_no_word() {
        assert_eq!(Record::Boundary.word(), None);
        assert!(Record::Boundary.is_boundary());
    }

    #[test]
    fn test_token_word() {
        let record = Record::Token(Token {
            token_number: 1,
            word: "kat".into(),
            lemma: "kat".into(),
            morph: "[kat]".into(),
            pos: "N(soort,ev)".into(),
            annotations: None,
        });
        assert_eq!(record.word(), Some("kat"));
        assert!(!record.is_boundary());
    }
}
