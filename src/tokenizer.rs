use once_cell::sync::Lazy;
use regex::Regex;

// Every char is either \w, \s or neither, so the three alternatives cover any input.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|[^\w\s]|\s+").unwrap());
static WORD_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punctuation,
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token in the source text.
    pub start: usize,
}

impl<'a> Token<'a> {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Lazy token stream over a borrowed text. Clone it to restart from the
/// current position.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.text.len() {
            return None;
        }
        let m = TOKEN_RE.find_at(self.text, self.pos)?;
        debug_assert_eq!(m.start(), self.pos);
        self.pos = m.end();
        Some(Token {
            kind: classify(m.as_str()),
            text: m.as_str(),
            start: m.start(),
        })
    }
}

// Only the \w+ alternative starts with a word char and only \s+ with whitespace.
fn classify(text: &str) -> TokenKind {
    if WORD_START_RE.is_match(text) {
        TokenKind::Word
    } else if text.starts_with(char::is_whitespace) {
        TokenKind::Whitespace
    } else {
        TokenKind::Punctuation
    }
}

/// Segments `text` into word, punctuation and whitespace tokens. Joining the
/// token texts in order gives back `text` exactly.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}
