//! Type and relation name derivation.
//!
//! Collection type names are derived from a record's singular kind by
//! pluralization (`"category"` → `"categories"`), and default relationship
//! cardinality is derived by checking whether a relation name is already
//! plural (`"comments"` is, `"author"` is not). The rules are a fixed table
//! of suffix rewrites plus irregular and uncountable word lists; they are not
//! linguistically complete, only self-consistent, so a name round-trips
//! through the engine unchanged.
//!
//! All functions here are pure and total over identifier-like ASCII words.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Singular/plural pairs that no suffix rule covers.
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("ox", "oxen"),
    ("datum", "data"),
    ("medium", "media"),
];

/// Words whose singular and plural forms are identical.
const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "money",
    "news",
    "rice",
    "series",
    "species",
    "fish",
    "sheep",
    "jeans",
    "police",
];

static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULARS.iter().copied().collect());

static IRREGULAR_SINGULARS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULARS.iter().map(|(s, p)| (*p, *s)).collect());

static UNCOUNTABLE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| UNCOUNTABLES.iter().copied().collect());

static PLURAL_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile_rules(&[
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(buffal|tomat|potat|her)o$", "${1}oes"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(alias|status)$", "${1}es"),
        (r"(?i)(octop|vir)us$", "${1}i"),
        (r"(?i)(ax|test)is$", "${1}es"),
        (r"(?i)s$", "s"),
    ])
});

static SINGULAR_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile_rules(&[
        (r"(?i)(quiz)zes$", "${1}"),
        (r"(?i)(matr)ices$", "${1}ix"),
        (r"(?i)(vert|ind)ices$", "${1}ex"),
        (r"(?i)(x|ch|ss|sh)es$", "${1}"),
        (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
        (r"(?i)(hive)s$", "${1}"),
        (r"(?i)([lr])ves$", "${1}f"),
        (r"(?i)([^f])ves$", "${1}fe"),
        (r"(?i)(analy|ba|diagno|parenthe|progno|synop|the)ses$", "${1}sis"),
        (r"(?i)([ti])a$", "${1}um"),
        (r"(?i)(buffal|tomat|potat|her)oes$", "${1}o"),
        (r"(?i)(bu)ses$", "${1}s"),
        (r"(?i)(alias|status)es$", "${1}"),
        (r"(?i)(octop|vir)i$", "${1}us"),
        (r"(?i)(ax|test)es$", "${1}is"),
        (r"(?i)s$", ""),
    ])
});

fn compile_rules(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("static naming rule"),
                *replacement,
            )
        })
        .collect()
}

/// Returns the plural form of a word.
///
/// Words that are already plural (or uncountable) are returned unchanged,
/// which is what makes [`is_plural`] a stable cardinality check.
///
/// # Example
///
/// ```ignore
/// use hyperdoc_core::naming::pluralize;
///
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("comments"), "comments");
/// ```
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();
    if UNCOUNTABLE_SET.contains(lower.as_str()) || IRREGULAR_SINGULARS.contains_key(lower.as_str())
    {
        return word.to_string();
    }
    if let Some(plural) = IRREGULAR_PLURALS.get(lower.as_str()) {
        return (*plural).to_string();
    }

    for (rule, replacement) in PLURAL_RULES.iter() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }

    format!("{word}s")
}

/// Returns the singular form of a word.
///
/// The inverse of [`pluralize`] over the same rule table.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();
    if UNCOUNTABLE_SET.contains(lower.as_str()) || IRREGULAR_PLURALS.contains_key(lower.as_str()) {
        return word.to_string();
    }
    if let Some(singular) = IRREGULAR_SINGULARS.get(lower.as_str()) {
        return (*singular).to_string();
    }

    for (rule, replacement) in SINGULAR_RULES.iter() {
        if rule.is_match(word) {
            return rule.replace(word, *replacement).into_owned();
        }
    }

    word.to_string()
}

/// Returns true if a word is its own plural form.
///
/// Used to resolve the default relationship cardinality: a plural relation
/// name defaults to to-many.
pub fn is_plural(word: &str) -> bool {
    pluralize(word) == word
}

/// Converts a type name to member-name form: the leading uppercase run is
/// lowercased, keeping the last capital of the run as the start of the next
/// word (`"SimplePost"` → `"simplePost"`, `"HTTPServer"` → `"httpServer"`).
pub fn member_name(name: &str) -> String {
    let upper_run = name.chars().take_while(|c| c.is_ascii_uppercase()).count();

    match upper_run {
        0 => name.to_string(),
        run if run == name.chars().count() => name.to_ascii_lowercase(),
        1 => {
            let mut chars = name.chars();
            let first = chars.next().map(|c| c.to_ascii_lowercase());
            first.into_iter().chain(chars).collect()
        }
        run => {
            let lowered: String = name
                .chars()
                .take(run - 1)
                .map(|c| c.to_ascii_lowercase())
                .collect();
            lowered + &name[run - 1..]
        }
    }
}

/// Derives the collection type name for a record kind: member-name formatting
/// followed by pluralization (`"SimplePost"` → `"simplePosts"`).
pub fn collection_name(kind: &str) -> String {
    pluralize(&member_name(kind))
}
