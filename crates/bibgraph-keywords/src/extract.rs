//! Keyword extraction from a single publication title.
//!
//! Two passes: a phrase scan over the accent-folded title, then residual
//! tokenization of whatever the phrases did not cover.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::tables::{CANONICAL, PHRASES, STOPWORDS};

/// Runs of letters with internal hyphens, starting with a letter.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z\-]{2,}").unwrap());

/// Accent-fold and lowercase a title for matching.
///
/// NFKD decomposition splits combined characters into base letter plus
/// combining marks; dropping the marks folds "Sémantique" to "semantique".
fn fold_title(title: &str) -> String {
    title
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display form for a phrase with no canonical label.
fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Phrase keywords present in the folded title: canonical labels in table
/// scan order, deduplicated (singular and plural variants share a label).
fn scan_phrases(folded: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for phrase in PHRASES {
        if folded.contains(phrase) {
            let label = match CANONICAL.get(phrase) {
                Some(label) => (*label).to_string(),
                None => title_case(phrase),
            };
            if !found.contains(&label) {
                found.push(label);
            }
        }
    }
    found
}

/// Tokens surviving after phrase removal: stopwords and short words
/// dropped, canonicalized, deduplicated, sorted.
fn residual_tokens(folded: &str, phrase_keywords: &[String]) -> Vec<String> {
    // Erase every phrase so its words cannot resurface as tokens.
    let mut residue = folded.to_string();
    for phrase in PHRASES {
        residue = residue.replace(phrase, " ");
    }

    let phrase_lower: Vec<String> = phrase_keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut tokens = BTreeSet::new();
    for m in WORD_RE.find_iter(&residue) {
        let word = m.as_str();
        if STOPWORDS.contains(word) || word.len() < 4 {
            continue;
        }
        let keyword = match CANONICAL.get(word) {
            Some(label) => (*label).to_string(),
            None => capitalize(word),
        };
        if phrase_lower.iter().any(|p| *p == keyword.to_lowercase()) {
            continue;
        }
        tokens.insert(keyword);
    }
    tokens.into_iter().collect()
}

/// Ordered keyword list for one title: phrase keywords in table scan
/// order, then residual tokens sorted lexicographically.
pub fn extract_keywords(title: &str) -> Vec<String> {
    let folded = fold_title(title);
    let mut keywords = scan_phrases(&folded);
    let tokens = residual_tokens(&folded, &keywords);
    keywords.extend(tokens);
    keywords
}
