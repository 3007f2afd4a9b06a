use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::hash::BuildHasher;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use encoding_rs::UTF_8;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Marker that opens a dictionary file.
pub const PREFIX: &str = "translation_dict =";

/// Read-only key lookup used by the rewriter.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: Lookup + ?Sized> Lookup for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

/// Word and phrase replacements keyed by lowercase source text.
///
/// Keys are stored exactly as inserted. [`Dictionary::parse`] and
/// [`Dictionary::load`] lowercase them; callers building a dictionary by hand
/// are expected to do the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reads and parses a `<language>_translations.txt` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading translation file: {}", path.display());
        let content = read_text(path)?;
        let dict = Self::parse(&content)?;
        debug!("{} entries in {}", dict.len(), path.display());
        Ok(dict)
    }

    /// Parses dictionary text: an optional `translation_dict =` prefix
    /// followed by a `{'key': 'value', ...}` literal. Keys are lowercased.
    pub fn parse(content: &str) -> Result<Self> {
        let body = content.trim_start();
        let (body, offset) = match body.strip_prefix(PREFIX) {
            Some(rest) => (rest, content.len() - rest.len()),
            None => (body, content.len() - body.len()),
        };

        let mut parser = Parser::new(body, position_of(content, offset));
        let pairs = parser.dict()?;

        let mut dict = Dictionary::new();
        for (key, value) in pairs {
            if let Some(old) = dict.insert(key.to_lowercase(), value) {
                debug!("duplicate key {:?} overrides {:?}", key.to_lowercase(), old);
            }
        }
        Ok(dict)
    }
}

impl Lookup for Dictionary {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Dictionary {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Reads a file as text. A byte order mark picks the encoding, UTF-8
/// otherwise; malformed sequences are replaced.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let (decoded, encoding, had_errors) = UTF_8.decode(&bytes);
    if had_errors {
        warn!(
            "encoding errors in {} (decoded as {})",
            path.display(),
            encoding.name()
        );
    }
    Ok(decoded.into_owned())
}

fn position_of(text: &str, byte_offset: usize) -> (usize, usize) {
    let before = &text[..byte_offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}

/// Recursive-descent reader for the dictionary literal.
struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, (line, column): (usize, usize)) -> Self {
        Parser {
            chars: text.chars().peekable(),
            line,
            column,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn expect(&mut self, want: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", want, c))),
            None => Err(self.error(format!("expected '{}', found end of input", want))),
        }
    }

    fn skip_blank(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn dict(&mut self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        self.skip_blank();
        self.expect('{')?;
        loop {
            self.skip_blank();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            let key = self.string()?;
            self.skip_blank();
            self.expect(':')?;
            self.skip_blank();
            let value = self.string()?;
            pairs.push((key, value));
            self.skip_blank();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unterminated dictionary")),
            }
        }
        self.skip_blank();
        if let Some(c) = self.peek() {
            return Err(self.error(format!("unexpected '{}' after dictionary", c)));
        }
        Ok(pairs)
    }

    /// One or more adjacent string literals, concatenated.
    fn string(&mut self) -> Result<String> {
        let mut out = self.literal()?;
        loop {
            self.skip_blank();
            match self.peek() {
                Some('\'' | '"' | 'r' | 'R' | 'u' | 'U') => out.push_str(&self.literal()?),
                _ => return Ok(out),
            }
        }
    }

    fn literal(&mut self) -> Result<String> {
        let raw = match self.peek() {
            Some('r' | 'R') => {
                self.bump();
                true
            }
            Some('u' | 'U') => {
                self.bump();
                false
            }
            _ => false,
        };
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => {
                self.bump();
                q
            }
            Some(c) => return Err(self.error(format!("expected string literal, found '{}'", c))),
            None => return Err(self.error("expected string literal, found end of input")),
        };

        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string literal")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') if raw => {
                    out.push('\\');
                    match self.bump() {
                        Some(c) => out.push(c),
                        None => return Err(self.error("unterminated string literal")),
                    }
                }
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<()> {
        let c = self
            .bump()
            .ok_or_else(|| self.error("unterminated string literal"))?;
        match c {
            '\n' => {}
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            'x' => out.push(self.hex_char(2)?),
            'u' => out.push(self.hex_char(4)?),
            'U' => out.push(self.hex_char(8)?),
            '0'..='7' => out.push(self.octal_char(c)?),
            'N' => return Err(self.error("named unicode escapes (\\N{...}) are not supported")),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    /// Up to three octal digits, the first already consumed.
    fn octal_char(&mut self, first: char) -> Result<char> {
        let mut code = first.to_digit(8).unwrap_or(0);
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    self.bump();
                    code = code * 8 + d;
                }
                None => break,
            }
        }
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point U+{:X}", code)))
    }

    fn hex_char(&mut self, digits: usize) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            let d = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error(format!("expected {} hex digits in escape", digits)))?;
            self.bump();
            code = code * 16 + d;
        }
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point U+{:X}", code)))
    }
}
