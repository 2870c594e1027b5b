//! Whitespace tokenization and part-of-speech classification.

use polish_morphology::{Lexicon, PartOfSpeech, Reading};

/// One whitespace-delimited token of a line. `position` and `length` are in
/// characters, as the editing layer counts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub position: usize,
    pub length: usize,
    /// The user is still typing this token: the line ended right after it,
    /// with no trailing whitespace.
    pub provisional: bool,
}

/// Split a line into tokens. The final token is provisional unless the line
/// ends with whitespace (a line terminator counts).
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut char_pos = 0;
    for (byte_pos, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some((start_byte, start_char)) = start.take() {
                tokens.push(Token {
                    text: &line[start_byte..byte_pos],
                    position: start_char,
                    length: char_pos - start_char,
                    provisional: false,
                });
            }
        } else if start.is_none() {
            start = Some((byte_pos, char_pos));
        }
        char_pos += 1;
    }
    if let Some((start_byte, start_char)) = start {
        tokens.push(Token {
            text: &line[start_byte..],
            position: start_char,
            length: char_pos - start_char,
            provisional: true,
        });
    }
    tokens
}

/// Order classification tries the tables in. A token valid as two parts of
/// speech always resolves to the earlier one; this is a fixed priority, not
/// disambiguation.
pub const CLASSIFY_PRIORITY: [PartOfSpeech; 4] = [
    PartOfSpeech::Noun,
    PartOfSpeech::Verb,
    PartOfSpeech::Adjective,
    PartOfSpeech::Pronoun,
];

/// Resolve a token to its first lexicon reading, or `None` for words the
/// lexicon does not know. A provisional token is never classified, even when
/// it already spells a complete valid word.
pub fn classify(lexicon: &Lexicon, token: &Token<'_>) -> Option<Reading> {
    if token.provisional {
        return None;
    }
    CLASSIFY_PRIORITY
        .iter()
        .find_map(|&pos| lexicon.lookup(pos, token.text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_char_positions() {
        let tokens = tokenize("pies  szczeka\n");
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].text, tokens[0].position, tokens[0].length), ("pies", 0, 4));
        assert_eq!((tokens[1].text, tokens[1].position, tokens[1].length), ("szczeka", 6, 7));
        assert!(!tokens[1].provisional);
    }

    #[test]
    fn test_positions_count_chars_not_bytes() {
        // "kość" is 4 characters but 6 bytes.
        let tokens = tokenize("kość psa ");
        assert_eq!(tokens[0].length, 4);
        assert_eq!(tokens[1].position, 5);
    }

    #[test]
    fn test_last_token_is_provisional_without_trailing_whitespace() {
        let tokens = tokenize("pies szcze");
        assert!(!tokens[0].provisional);
        assert!(tokens[1].provisional);
    }

    #[test]
    fn test_trailing_space_or_newline_completes_the_last_token() {
        assert!(!tokenize("pies ").pop().unwrap().provisional);
        assert!(!tokenize("pies\n").pop().unwrap().provisional);
    }

    #[test]
    fn test_empty_and_whitespace_lines_have_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
    }
}
