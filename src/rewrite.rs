use once_cell::sync::Lazy;
use tracing::trace;

use crate::dictionary::Lookup;
use crate::tokenizer::{tokenize, Token, TokenKind};

/// Casing of a source word, reapplied to its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePattern {
    /// Every cased character is uppercase (`HELLO`, `A1`).
    Upper,
    /// Uppercase first character followed by more characters (`Hello`, `HeLLo`).
    Capitalized,
    /// A lone uppercase character. [`CasePattern::of`] never returns this,
    /// since such a word is already [`CasePattern::Upper`].
    Initial,
    /// Lowercase, mixed starting lowercase, or uncased (`hello`, `iPhone`, `42`).
    AsStored,
}

impl CasePattern {
    pub fn of(word: &str) -> CasePattern {
        let mut cased = word.chars().filter(|c| c.is_uppercase() || c.is_lowercase());
        let has_cased = cased.clone().next().is_some();
        if has_cased && cased.all(char::is_uppercase) {
            return CasePattern::Upper;
        }
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => {
                if chars.next().is_some() {
                    CasePattern::Capitalized
                } else {
                    CasePattern::Initial
                }
            }
            _ => CasePattern::AsStored,
        }
    }

    pub fn apply(self, replacement: &str) -> String {
        let mut chars = replacement.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return String::new(),
        };
        match self {
            CasePattern::Upper => replacement.to_uppercase(),
            CasePattern::Capitalized => {
                let mut out: String = first.to_uppercase().collect();
                out.push_str(&chars.as_str().to_lowercase());
                out
            }
            CasePattern::Initial => {
                let mut out: String = first.to_uppercase().collect();
                out.push_str(chars.as_str());
                out
            }
            CasePattern::AsStored => replacement.to_string(),
        }
    }
}

/// Predicate for one token in a phrase window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Any word token.
    Word,
    /// Any whitespace run.
    Whitespace,
    /// A token with exactly this text.
    Exact(String),
    /// A word token equal to this text, ignoring case. Give it in lowercase.
    WordIgnoreCase(String),
}

impl Slot {
    fn accepts(&self, token: &Token<'_>) -> bool {
        match self {
            Slot::Word => token.kind == TokenKind::Word,
            Slot::Whitespace => token.kind == TokenKind::Whitespace,
            Slot::Exact(text) => token.text == text.as_str(),
            Slot::WordIgnoreCase(text) => token.is_word() && token.text.to_lowercase() == *text,
        }
    }
}

/// How a phrase rule builds its dictionary key from the matched window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseKey {
    /// Always look up this key.
    Fixed(String),
    /// The first token lowercased, followed by this suffix.
    FirstWordWith(String),
}

/// A fixed-width lookahead tried at a word token before single-word lookup.
/// The window always starts at that word token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRule {
    pub name: String,
    pub window: Vec<Slot>,
    pub key: PhraseKey,
}

impl PhraseRule {
    /// `<word> all`, with any whitespace run between the two words.
    pub fn word_all() -> Self {
        PhraseRule {
            name: "<word> all".to_string(),
            window: vec![
                Slot::Word,
                Slot::Whitespace,
                Slot::WordIgnoreCase("all".to_string()),
            ],
            key: PhraseKey::FirstWordWith(" all".to_string()),
        }
    }

    /// `<word>-bye`, looked up as `good-bye` whatever the first word is.
    pub fn good_bye() -> Self {
        PhraseRule {
            name: "good-bye".to_string(),
            window: vec![
                Slot::Word,
                Slot::Exact("-".to_string()),
                Slot::WordIgnoreCase("bye".to_string()),
            ],
            key: PhraseKey::Fixed("good-bye".to_string()),
        }
    }

    /// Returns the dictionary key if the window fits at `tokens[at..]`.
    fn key_at(&self, tokens: &[Token<'_>], at: usize) -> Option<String> {
        let window = tokens.get(at..at + self.window.len())?;
        if !self.window.iter().zip(window).all(|(slot, t)| slot.accepts(t)) {
            return None;
        }
        Some(match &self.key {
            PhraseKey::Fixed(key) => key.clone(),
            PhraseKey::FirstWordWith(suffix) => {
                let mut key = window[0].text.to_lowercase();
                key.push_str(suffix);
                key
            }
        })
    }
}

static DEFAULT_REWRITER: Lazy<Rewriter> = Lazy::new(Rewriter::default);

/// Rewrites text against a dictionary, phrase rules first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewriter {
    rules: Vec<PhraseRule>,
}

impl Default for Rewriter {
    fn default() -> Self {
        Rewriter {
            rules: vec![PhraseRule::word_all(), PhraseRule::good_bye()],
        }
    }
}

impl Rewriter {
    /// Rules are tried in the given order.
    pub fn with_rules(rules: Vec<PhraseRule>) -> Self {
        Rewriter { rules }
    }

    pub fn rules(&self) -> &[PhraseRule] {
        &self.rules
    }

    pub fn rewrite<D: Lookup + ?Sized>(&self, text: &str, dict: &D) -> String {
        let tokens: Vec<Token<'_>> = tokenize(text).collect();
        let mut out = String::with_capacity(text.len());

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            if !token.is_word() {
                out.push_str(token.text);
                i += 1;
                continue;
            }

            let (replacement, consumed) = match self.match_phrase(&tokens, i, dict) {
                Some((value, width)) => (Some(value), width),
                None => (dict.lookup(&token.text.to_lowercase()), 1),
            };

            match replacement {
                Some(value) => out.push_str(&CasePattern::of(token.text).apply(value)),
                None => out.push_str(token.text),
            }
            i += consumed;
        }
        out
    }

    fn match_phrase<'d, D: Lookup + ?Sized>(
        &self,
        tokens: &[Token<'_>],
        at: usize,
        dict: &'d D,
    ) -> Option<(&'d str, usize)> {
        self.rules.iter().find_map(|rule| {
            let key = rule.key_at(tokens, at)?;
            let value = dict.lookup(&key)?;
            trace!(rule = %rule.name, key = %key, "phrase matched");
            Some((value, rule.window.len()))
        })
    }
}

/// Rewrites `text` with the built-in phrase rules.
pub fn translate<D: Lookup + ?Sized>(text: &str, dict: &D) -> String {
    DEFAULT_REWRITER.rewrite(text, dict)
}
