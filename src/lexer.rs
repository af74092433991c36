//! Splits a filter string into its token stream.
//!
//! The stream alternates operand fragments and connectives:
//! `a==0&b!=0|c<5` becomes `["a==0", "&", "b!=0", "|", "c<5"]`. Fragments
//! are kept verbatim, including empty ones, so a trailing connective shows
//! up as a trailing empty fragment.

/// Characters that separate operand fragments.
pub const CONNECTIVES: [char; 2] = ['&', '|'];

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn read_fragment(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if CONNECTIVES.contains(&ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    /// Consumes the input and returns the full token stream.
    pub fn tokenize(mut self) -> Vec<String> {
        let mut tokens = vec![self.read_fragment()];

        while let Some(ch) = self.current_char() {
            self.advance(); // consume connective
            tokens.push(ch.to_string());
            tokens.push(self.read_fragment());
        }

        log::trace!("tokenized into {} tokens: {:?}", tokens.len(), tokens);
        tokens
    }
}

/// Shorthand for `Lexer::new(input).tokenize()`.
pub fn tokenize(input: &str) -> Vec<String> {
    Lexer::new(input).tokenize()
}

#[test]
fn test_single_fragment() {
    assert_eq!(tokenize("field==1"), vec!["field==1"]);
}

#[test]
fn test_connectives_are_captured() {
    assert_eq!(
        tokenize("a==0&b!=0|c<5"),
        vec!["a==0", "&", "b!=0", "|", "c<5"]
    );
}
