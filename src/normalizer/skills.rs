// Skill phrase grouping and cleaning
use crate::model::TaggedToken;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static BRACKETS_AND_QUOTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[#()\[\]{}«»"“”'‘’•—]"#).unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACED_SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s\-/+.]").unwrap());

/// Fragments the model emits on its own that are never skills.
const REJECTED: &[&str] = &["##i", ".", "'s", "’s", "‘s"];

/// Cleans raw skill phrases and drops duplicates, keeping first-seen order.
///
/// Duplicates are compared as exact strings, so `Python` and `python` both survive.
pub fn clean_skills<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();

    for phrase in raw {
        let Some(skill) = clean_phrase(phrase.as_ref()) else {
            continue;
        };
        if seen.insert(skill.clone()) {
            cleaned.push(skill);
        }
    }

    cleaned
}

/// Normalizes a single phrase, returning `None` when nothing usable is left.
pub fn clean_phrase(phrase: &str) -> Option<String> {
    let skill = BRACKETS_AND_QUOTES.replace_all(phrase, "");
    let skill = WHITESPACE.replace_all(skill.trim(), " ");
    let skill = SPACED_SLASH.replace_all(&skill, "/");
    let skill = DISALLOWED.replace_all(&skill, "");
    // removals above can leave doubled or trailing spaces behind
    let skill = WHITESPACE.replace_all(skill.trim(), " ").into_owned();

    if skill.chars().count() <= 2 {
        return None;
    }
    let lowered = skill.to_lowercase();
    if REJECTED.contains(&lowered.as_str()) {
        return None;
    }
    Some(skill)
}

/// Groups IOB-tagged tokens into raw phrases.
///
/// A phrase starts at every `B` and grows while `I` tags follow. Any other tag
/// closes it, and an `I` with no open phrase is ignored.
pub fn group_phrases(tokens: &[TaggedToken]) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in tokens {
        match token.entity_group.as_str() {
            "B" => {
                if !current.is_empty() {
                    phrases.push(current.join(" "));
                }
                current = vec![token.word.as_str()];
            }
            "I" if !current.is_empty() => current.push(token.word.as_str()),
            _ => {
                if !current.is_empty() {
                    phrases.push(current.join(" "));
                    current.clear();
                }
            }
        }
    }

    if !current.is_empty() {
        phrases.push(current.join(" "));
    }

    phrases
}
