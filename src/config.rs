use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where `*_translations.txt` files are looked up.
    pub dictionary_dir: PathBuf,
}

impl Config {
    /// Builds the config from command-line arguments without the program
    /// name: `[DICTIONARY_DIR]`. Defaults to the executable's directory.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let dir = args.next();
        if let Some(extra) = args.next() {
            return Err(Error::Usage(format!("unexpected argument '{}'", extra)));
        }
        let dictionary_dir = match dir {
            Some(dir) => PathBuf::from(dir),
            None => exe_dir()?,
        };
        Ok(Config { dictionary_dir })
    }
}

/// Directory containing the running executable.
pub fn exe_dir() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| Error::io("current executable", e))?;
    let exe = exe.canonicalize().unwrap_or(exe);
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let config = Config::from_args(vec!["dicts".to_string()]).unwrap();
        assert_eq!(config.dictionary_dir, PathBuf::from("dicts"));
    }

    #[test]
    fn defaults_to_executable_directory() {
        let config = Config::from_args(Vec::new()).unwrap();
        assert_eq!(config.dictionary_dir, exe_dir().unwrap());
        assert!(config.dictionary_dir.is_dir());
    }

    #[test]
    fn rejects_extra_arguments() {
        let err = Config::from_args(vec!["a".to_string(), "b".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }
}
