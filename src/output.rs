//! Post-processing transforms over the output sequence.
//!
//! These are pure functions layered on top of the protocol client: a keyed
//! mapping from zero-based token position to the token's fields, and a
//! canonical JSON rendering of that mapping with deterministically ordered
//! keys. Nothing here touches the socket.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::record::{Record, Token};

/// Output shape selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The output sequence as-is.
    #[default]
    Plain,
    /// Keyed mapping, token position -> fields.
    Dict,
    /// The keyed mapping serialized as canonical JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "dict" => Ok(OutputFormat::Dict),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Maps every real token to its fields, keyed by zero-based token number.
///
/// Sentence boundaries contribute no entry of their own but are counted by
/// the `"length"` key, which holds the full sequence length.
pub fn keyed_map(records: &[Record]) -> BTreeMap<String, Value> {
    let mut map = BTreeMap::new();
    for record in records {
        if let Record::Token(token) = record {
            map.insert(
                token.token_number.saturating_sub(1).to_string(),
                token_fields(token),
            );
        }
    }
    map.insert("length".to_string(), json!(records.len()));
    map
}

/// Serializes the keyed mapping; `BTreeMap` fixes the key order.
pub fn to_json(records: &[Record]) -> serde_json::Result<String> {
    serde_json::to_string(&keyed_map(records))
}

fn token_fields(token: &Token) -> Value {
    let mut fields = serde_json::Map::new();
    fields.insert("token_number".into(), json!(token.token_number));
    fields.insert("word".into(), json!(token.word));
    fields.insert("lemma".into(), json!(token.lemma));
    fields.insert("morph".into(), json!(token.morph));
    fields.insert("pos".into(), json!(token.pos));
    if let Some(annotations) = &token.annotations {
        fields.insert("confidence".into(), json!(annotations.confidence));
        fields.insert("named_entity".into(), json!(annotations.named_entity));
        fields.insert("chunk".into(), json!(annotations.chunk));
        fields.insert("token_number_head".into(), json!(annotations.head));
        fields.insert("dependency_type".into(), json!(annotations.dependency));
    }
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Annotations;

    fn token(n: u32, word: &str) -> Record {
        Record::Token(Token {
            token_number: n,
            word: word.into(),
            lemma: word.into(),
            morph: format!("[{word}]"),
            pos: "N".into(),
            annotations: None,
        })
    }

    #[test]
    fn test_keyed_map_positions_and_length() {
        let records = vec![token(1, "dit"), token(2, "is"), Record::Boundary, token(1, "ja")];
        let map = keyed_map(&records);
        // Second sentence reuses position 0; the later token wins, as the
        // flat numbering dictates.
        assert_eq!(map["0"]["word"], "ja");
        assert_eq!(map["1"]["word"], "is");
        assert_eq!(map["length"], json!(4));
    }

    #[test]
    fn test_extended_fields_present() {
        let record = Record::Token(Token {
            token_number: 1,
            word: "kat".into(),
            lemma: "kat".into(),
            morph: "[kat]".into(),
            pos: "N".into(),
            annotations: Some(Annotations {
                confidence: Some(0.99),
                named_entity: Some("O".into()),
                chunk: Some("B-NP".into()),
                head: Some(2),
                dependency: Some("su".into()),
            }),
        });
        let map = keyed_map(&[record]);
        assert_eq!(map["0"]["confidence"], json!(0.99));
        assert_eq!(map["0"]["token_number_head"], json!(2));
    }

    #[test]
    fn test_json_keys_are_sorted() {
        let records = vec![token(1, "a")];
        let text = to_json(&records).unwrap();
        let zero = text.find("\"0\"").unwrap();
        let length = text.find("\"length\"").unwrap();
        assert!(zero < length);
    }
}
