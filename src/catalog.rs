use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use tracing::{info, warn};

use crate::dictionary::{self, Dictionary, PREFIX};
use crate::error::{Error, Result};

pub const FILE_SUFFIX: &str = "_translations.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub path: PathBuf,
}

impl Language {
    pub fn load(&self) -> Result<Dictionary> {
        Dictionary::load(&self.path)
    }
}

/// The languages whose dictionary files were found in one directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
    languages: Vec<Language>,
}

impl Catalog {
    /// Finds `*_translations.txt` files in `dir`. Files that cannot be read,
    /// lack the `translation_dict =` prefix or fail to parse are skipped.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Scanning directory: {}", dir.display());

        let pattern = format!(
            "{}/*{}",
            Pattern::escape(&dir.to_string_lossy()),
            FILE_SUFFIX
        );

        let mut languages = Vec::new();
        for entry in glob(&pattern)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Error reading glob entry: {}", e);
                    continue;
                }
            };
            let name = match language_name(&path) {
                Some(name) => name,
                None => continue,
            };
            match validate(&path) {
                Ok(()) => languages.push(Language { name, path }),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        languages.sort_by(|a, b| a.name.cmp(&b.name));

        info!(
            "Found languages: {:?}",
            languages.iter().map(|l| l.name.as_str()).collect::<Vec<_>>()
        );

        Ok(Catalog {
            dir: dir.to_path_buf(),
            languages,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.name == name)
    }
}

fn language_name(path: &Path) -> Option<String> {
    path.file_name()?
        .to_str()?
        .strip_suffix(FILE_SUFFIX)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// A dictionary file is listed only if it opens with the prefix and parses.
fn validate(path: &Path) -> Result<()> {
    let content = dictionary::read_text(path)?;
    if !content.trim().starts_with(PREFIX) {
        return Err(Error::MissingPrefix {
            path: path.to_path_buf(),
        });
    }
    Dictionary::parse(&content)?;
    Ok(())
}
