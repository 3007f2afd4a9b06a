use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use conlang::{tokenize, translate, Dictionary, TokenKind};
use proptest::prelude::*;

fn dict(pairs: &[(&str, &str)]) -> Dictionary {
    pairs.iter().copied().collect()
}

#[test]
fn case_preservation_laws() {
    let d = dict(&[("hello", "zorg")]);
    assert_eq!(translate("HELLO", &d), "ZORG");
    assert_eq!(translate("Hello", &d), "Zorg");
    assert_eq!(translate("hello", &d), "zorg");
}

#[test]
fn phrase_priority_over_single_word() {
    let d = dict(&[("you all", "yall-conlang"), ("you", "yu")]);
    assert_eq!(translate("you all", &d), "yall-conlang");
    assert_eq!(translate("you", &d), "yu");
}

#[test]
fn phrase_non_match_falls_back_per_word() {
    let d = dict(&[("you", "yu")]);
    assert_eq!(translate("you all", &d), "yu all");
}

#[test]
fn good_bye_phrase() {
    let d = dict(&[("good-bye", "vashtu")]);
    assert_eq!(translate("Good-bye", &d), "Vashtu");
}

#[test]
fn punctuation_and_whitespace_preserved() {
    let d = dict(&[("hello", "zorg")]);
    assert_eq!(translate("Hello, world!", &d), "Zorg, world!");
}

#[test]
fn non_ascii_words_are_single_tokens() {
    let words: Vec<_> = tokenize("naïve Übermensch señor")
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| t.text)
        .collect();
    assert_eq!(words, vec!["naïve", "Übermensch", "señor"]);

    let d = dict(&[("señor", "sir")]);
    assert_eq!(translate("Señor!", &d), "Sir!");
}

#[test]
fn mixed_sentence() {
    let d = dict(&[
        ("hello", "zorg"),
        ("friend", "vrenn"),
        ("you all", "yall"),
        ("good-bye", "vashtu"),
    ]);
    assert_eq!(
        translate("Hello, FRIEND... you all: Good-bye!", &d),
        "Zorg, VRENN... yall: Vashtu!"
    );
}

#[test]
fn shared_dictionary_across_threads() {
    let d = Arc::new(dict(&[("hello", "zorg")]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let d = Arc::clone(&d);
            thread::spawn(move || translate("Hello there", &*d))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Zorg there");
    }
}

proptest! {
    #[test]
    fn empty_dictionary_is_identity(s in any::<String>()) {
        prop_assert_eq!(translate(&s, &HashMap::<String, String>::new()), s);
    }

    #[test]
    fn unknown_words_pass_through(s in "[a-zA-Z ,.!?\\-]{0,60}") {
        let d = dict(&[("q9", "never")]);
        prop_assert_eq!(translate(&s, &d), s);
    }

    #[test]
    fn replaced_words_follow_source_case(word in "[a-z]{2,8}", upper in any::<bool>()) {
        let d = dict(&[(word.as_str(), "zorg")]);
        let input = if upper { word.to_uppercase() } else { word.clone() };
        let expected = if upper { "ZORG" } else { "zorg" };
        prop_assert_eq!(translate(&format!("<{}>", input), &d), format!("<{}>", expected));
    }
}
