//! Input/output word alignment.
//!
//! The server re-tokenizes its input, so the caller's whitespace split and
//! the server's token stream can disagree (clitics split off, punctuation
//! separated). The aligner recovers a best-effort correspondence with a
//! single greedy forward pass and one token of lookahead. The heuristic is
//! deliberately kept exactly as downstream consumers know it, imprecision
//! included: it never looks backward and never consumes zero output slots.

use crate::record::Record;

/// For each input word, the index of the matching output entry, or `None`.
///
/// The result always has one verdict per input word. Sentence boundaries in
/// `output` participate as ordinary entries that match nothing.
pub fn align(input_words: &[&str], output: &[Record]) -> Vec<Option<usize>> {
    let word_at = |i: usize| output.get(i).and_then(Record::word);

    let mut alignment = Vec::with_capacity(input_words.len());
    let mut cursor = 0;
    for &input_word in input_words {
        if word_at(cursor) == Some(input_word) {
            alignment.push(Some(cursor));
            cursor += 1;
        } else if word_at(cursor + 1) == Some(input_word) {
            // The server inserted or split off one extra token; skip it.
            alignment.push(Some(cursor + 1));
            cursor += 2;
        } else {
            alignment.push(None);
            cursor += 1;
        }
    }
    alignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Token;

    fn words(items: &[&str]) -> Vec<Record> {
        items
            .iter()
            .map(|w| {
                Record::Token(Token {
                    token_number: 1,
                    word: w.to_string(),
                    lemma: w.to_string(),
                    morph: format!("[{w}]"),
                    pos: "N".into(),
                    annotations: None,
                })
            })
            .collect()
    }

    #[test]
    fn test_identical_sequences_align_one_to_one() {
        let output = words(&["the", "cat"]);
        assert_eq!(align(&["the", "cat"], &output), vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_split_clitic_gives_no_correspondence() {
        // "don't" -> ["do", "n't"]: neither the cursor nor the lookahead
        // position matches, so the verdict is None and the cursor moves one.
        let output = words(&["do", "n't"]);
        assert_eq!(align(&["don't"], &output), vec![None]);
    }

    #[test]
    fn test_inserted_token_is_skipped() {
        let output = words(&["``", "hello", "world"]);
        assert_eq!(align(&["hello", "world"], &output), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_resync_after_miss() {
        let output = words(&["x", "y", "b"]);
        // "a" matches nothing (cursor 0, lookahead 1), cursor advances to 1;
        // "b" is then found via lookahead at index 2.
        assert_eq!(align(&["a", "b"], &output), vec![None, Some(2)]);
    }

    #[test]
    fn test_boundary_never_matches() {
        let mut output = words(&["one"]);
        output.push(Record::Boundary);
        output.extend(words(&["two"]));
        assert_eq!(align(&["one", "two"], &output), vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_case_sensitive() {
        let output = words(&["The"]);
        assert_eq!(align(&["the"], &output), vec![None]);
    }

    #[test]
    fn test_input_longer_than_output() {
        let output = words(&["a"]);
        assert_eq!(align(&["a", "b", "c"], &output), vec![Some(0), None, None]);
    }
}
