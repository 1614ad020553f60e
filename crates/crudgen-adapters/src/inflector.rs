//! English [`Inflector`] for model and relation names.
//!
//! Only the last word of a compound name is inflected, so `BlogPost` becomes
//! `BlogPosts` and `team_member` becomes `team_members`. The case style of
//! that word is kept (`Person` → `People`, `URL` → `URLS`).

use crudgen_core::domain::Inflector;

/// (singular, plural) pairs the suffix rules get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("thief", "thieves"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("criterion", "criteria"),
    ("quiz", "quizzes"),
];

const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "hardware",
    "information",
    "metadata",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
    "staff",
    "traffic",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl EnglishInflector {
    pub fn new() -> Self {
        Self
    }
}

impl Inflector for EnglishInflector {
    fn plural(&self, word: &str) -> String {
        inflect(word, plural_of)
    }

    fn singular(&self, word: &str) -> String {
        inflect(word, singular_of)
    }
}

/// Apply `rule` to the lowercase last segment and restore its case.
fn inflect(word: &str, rule: fn(&str) -> String) -> String {
    let (head, last) = split_last_segment(word);
    if last.is_empty() {
        return word.to_string();
    }

    let lower = last.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    format!("{head}{}", match_case(last, &rule(&lower)))
}

fn plural_of(word: &str) -> String {
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix('y')
        && stem.chars().last().is_some_and(|c| !is_vowel(c))
    {
        return format!("{stem}ies");
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

fn singular_of(word: &str) -> String {
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return (*singular).to_string();
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == word) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }

    if ["sses", "uses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|s| word.ends_with(s))
    {
        return word[..word.len() - 2].to_string();
    }

    if ["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word.to_string();
    }

    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Split at the last word boundary: a separator or a lower→upper transition.
fn split_last_segment(word: &str) -> (&str, &str) {
    let mut boundary = 0;
    let mut prev: Option<char> = None;

    for (i, c) in word.char_indices() {
        if matches!(c, '_' | '-' | ' ') {
            boundary = i + c.len_utf8();
        } else if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            boundary = i;
        }
        prev = Some(c);
    }

    word.split_at(boundary)
}

/// Give `inflected` (lowercase) the case style of `original`.
fn match_case(original: &str, inflected: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    let all_upper = first_upper && original.chars().all(|c| !c.is_lowercase()) && original.len() > 1;

    if all_upper {
        inflected.to_uppercase()
    } else if first_upper {
        let mut out = String::with_capacity(inflected.len());
        let mut rest = inflected.chars();
        if let Some(first) = rest.next() {
            out.extend(first.to_uppercase());
        }
        out.extend(rest);
        out
    } else {
        inflected.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plural(word: &str) -> String {
        EnglishInflector.plural(word)
    }

    fn singular(word: &str) -> String {
        EnglishInflector.singular(word)
    }

    #[test]
    fn regular_suffixes() {
        assert_eq!(plural("post"), "posts");
        assert_eq!(plural("category"), "categories");
        assert_eq!(plural("day"), "days");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("status"), "statuses");
        assert_eq!(plural("branch"), "branches");
    }

    #[test]
    fn irregular_and_uncountable() {
        assert_eq!(plural("person"), "people");
        assert_eq!(plural("child"), "children");
        assert_eq!(plural("sheep"), "sheep");
        assert_eq!(plural("people"), "people");
        assert_eq!(singular("people"), "person");
        assert_eq!(singular("news"), "news");
    }

    #[test]
    fn case_style_is_kept() {
        assert_eq!(plural("Category"), "Categories");
        assert_eq!(plural("Person"), "People");
        assert_eq!(plural("URL"), "URLS");
    }

    #[test]
    fn only_the_last_segment_is_inflected() {
        assert_eq!(plural("BlogPost"), "BlogPosts");
        assert_eq!(plural("SalesPerson"), "SalesPeople");
        assert_eq!(plural("team_member"), "team_members");
        assert_eq!(singular("BlogPosts"), "BlogPost");
    }

    #[test]
    fn singular_forms() {
        assert_eq!(singular("categories"), "category");
        assert_eq!(singular("boxes"), "box");
        assert_eq!(singular("classes"), "class");
        assert_eq!(singular("posts"), "post");
        assert_eq!(singular("status"), "status");
        assert_eq!(singular("Users"), "User");
    }

    #[test]
    fn empty_word() {
        assert_eq!(plural(""), "");
        assert_eq!(singular(""), "");
    }
}
