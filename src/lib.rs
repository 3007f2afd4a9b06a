//! Word and phrase substitution for constructed-language dictionaries.
//!
//! Text is split into word, punctuation and whitespace tokens, words (and a
//! couple of fixed phrases) are replaced from a lowercase-keyed dictionary,
//! and the source word's casing is reapplied to the replacement. Everything
//! that is not replaced comes out unchanged.

pub mod catalog;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod repl;
pub mod rewrite;
pub mod tokenizer;

pub use catalog::{Catalog, Language};
pub use config::Config;
pub use dictionary::{Dictionary, Lookup};
pub use error::{Error, Result};
pub use rewrite::{translate, CasePattern, PhraseKey, PhraseRule, Rewriter, Slot};
pub use tokenizer::{tokenize, Token, TokenKind, Tokens};

/// Installs the stderr log subscriber used by the binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
