//! Line-oriented interactive front end.

use std::io::{BufRead, Write};

use tracing::{debug, error};

use crate::catalog::{Catalog, Language};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::rewrite::Rewriter;

/// Word that ends a translation session, matched ignoring case.
pub const EXIT_COMMAND: &str = "exit";

/// Reads one line without its line terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Prints the numbered language list and asks until a valid number is
/// given. Returns `None` if input ends first.
pub fn choose_language<'c, R: BufRead, W: Write>(
    catalog: &'c Catalog,
    input: &mut R,
    output: &mut W,
) -> Result<Option<&'c Language>> {
    let languages = catalog.languages();
    if languages.is_empty() {
        return Err(Error::NoLanguages {
            dir: catalog.dir().to_path_buf(),
        });
    }

    writeln!(output, "\nAvailable languages:")?;
    for (i, language) in languages.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, language.name)?;
    }

    loop {
        write!(output, "Select a language (enter the number): ")?;
        output.flush()?;
        let line = match read_line(input)? {
            Some(line) => line,
            None => return Ok(None),
        };
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=languages.len()).contains(&n) => return Ok(Some(&languages[n - 1])),
            Ok(_) => writeln!(
                output,
                "Please enter a number between 1 and {}.",
                languages.len()
            )?,
            Err(_) => writeln!(output, "Please enter a valid number.")?,
        }
    }
}

/// Loads a language's dictionary, treating a failed load like an empty one.
pub fn load_language(language: &Language) -> Result<Dictionary> {
    let dict = match language.load() {
        Ok(dict) => dict,
        Err(e) => {
            error!("{}", e);
            Dictionary::new()
        }
    };
    if dict.is_empty() {
        return Err(Error::EmptyDictionary {
            language: language.name.clone(),
        });
    }
    Ok(dict)
}

/// Translates lines from `input` until `exit` or end of input.
pub fn translate_loop<R: BufRead, W: Write>(
    language: &str,
    dict: &Dictionary,
    rewriter: &Rewriter,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "\nWelcome to the {} Translator!", language)?;
    writeln!(output, "Enter text to translate (or type 'exit' to quit):")?;

    loop {
        write!(output, "> ")?;
        output.flush()?;
        let line = match read_line(input)? {
            Some(line) => line,
            None => {
                debug!("input closed");
                writeln!(output)?;
                return Ok(());
            }
        };
        if line.to_lowercase() == EXIT_COMMAND {
            writeln!(output, "Goodbye! (Vekhterüszt in {}!)", language)?;
            return Ok(());
        }
        if line.trim().is_empty() {
            writeln!(output, "Please enter some text to translate.")?;
            continue;
        }
        writeln!(output, "Translated: {}\n", rewriter.rewrite(&line, dict))?;
    }
}

/// Whole interactive session: pick a language, load it, translate lines.
pub fn run<R: BufRead, W: Write>(catalog: &Catalog, input: &mut R, output: &mut W) -> Result<()> {
    let language = match choose_language(catalog, input, output)? {
        Some(language) => language,
        None => return Ok(()),
    };
    let dict = load_language(language)?;
    translate_loop(&language.name, &dict, &Rewriter::default(), input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn catalog_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let catalog = Catalog::scan(dir.path()).unwrap();
        (dir, catalog)
    }

    fn session(catalog: &Catalog, script: &str) -> (Result<()>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = run(catalog, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn full_session_transcript() {
        let (_dir, catalog) = catalog_with(&[(
            "zorgish_translations.txt",
            "translation_dict = {'hello': 'zorg', 'you all': 'yall'}",
        )]);
        let (result, out) = session(&catalog, "1\nHello, world!\n\n   \nyou all\nEXIT\nignored\n");
        result.unwrap();
        assert_eq!(
            out,
            "\nAvailable languages:\n\
             1. zorgish\n\
             Select a language (enter the number): \
             \nWelcome to the zorgish Translator!\n\
             Enter text to translate (or type 'exit' to quit):\n\
             > Translated: Zorg, world!\n\n\
             > Please enter some text to translate.\n\
             > Please enter some text to translate.\n\
             > Translated: yall\n\n\
             > Goodbye! (Vekhterüszt in zorgish!)\n"
        );
    }

    #[test]
    fn reprompts_for_bad_choices() {
        let (_dir, catalog) = catalog_with(&[
            ("a_translations.txt", "translation_dict = {'x': 'y'}"),
            ("b_translations.txt", "translation_dict = {'x': 'z'}"),
        ]);
        let (result, out) = session(&catalog, "zero\n3\n0\n2\nx\nexit\n");
        result.unwrap();
        assert!(out.contains("Please enter a valid number.\n"));
        assert_eq!(out.matches("Please enter a number between 1 and 2.\n").count(), 2);
        assert!(out.contains("Welcome to the b Translator!"));
        assert!(out.contains("Translated: z\n"));
    }

    #[test]
    fn end_of_input_ends_quietly() {
        let (_dir, catalog) = catalog_with(&[("a_translations.txt", "translation_dict = {'x': 'y'}")]);
        let (result, out) = session(&catalog, "1\nx");
        result.unwrap();
        assert!(out.contains("Translated: y\n"));
        assert!(!out.contains("Goodbye"));

        let (result, _) = session(&catalog, "");
        result.unwrap();
    }

    #[test]
    fn windows_line_endings_are_stripped() {
        let (_dir, catalog) = catalog_with(&[("a_translations.txt", "translation_dict = {'x': 'y'}")]);
        let (result, out) = session(&catalog, "1\r\nx\r\nexit\r\n");
        result.unwrap();
        assert!(out.contains("Translated: y\n"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn empty_dictionary_aborts() {
        let (_dir, catalog) = catalog_with(&[("void_translations.txt", "translation_dict = {}")]);
        let (result, _) = session(&catalog, "1\nhello\n");
        match result {
            Err(Error::EmptyDictionary { language }) => assert_eq!(language, "void"),
            other => panic!("expected EmptyDictionary, got {:?}", other),
        }
    }

    #[test]
    fn no_languages_is_an_error() {
        let (_dir, catalog) = catalog_with(&[]);
        let (result, out) = session(&catalog, "1\n");
        assert!(matches!(result, Err(Error::NoLanguages { .. })));
        assert!(out.is_empty());
    }
}
