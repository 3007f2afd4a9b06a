use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid dictionary format at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{} does not start with 'translation_dict ='", path.display())]
    MissingPrefix { path: PathBuf },

    #[error("no valid translation files found in {} (looking for '*_translations.txt')", dir.display())]
    NoLanguages { dir: PathBuf },

    #[error("no translations loaded for {language}")]
    EmptyDictionary { language: String },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),

    #[error("usage: {0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
