//! Casing conversion for schema names.

use crate::rules::Casing;

/// Splits a schema name into words.
///
/// Words break at non-alphanumeric characters, at lower-to-upper
/// transitions (`fooBar`) and before the last capital of an acronym that is
/// followed by a lowercase letter (`HTTPServer` → `HTTP`, `Server`). Digits
/// stay attached to the preceding word.
#[must_use]
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            let boundary = c.is_uppercase()
                && ((prev.is_lowercase() || prev.is_numeric())
                    || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a string to PascalCase, preserving the case of non-initial
/// letters.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Converts a string to camelCase.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut result = String::with_capacity(s.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            result.push_str(&word.to_lowercase());
        } else {
            result.push_str(&capitalize(word));
        }
    }
    result
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Applies a casing convention and makes the result a legal identifier.
///
/// Returns `None` if the name has no identifier characters at all.
#[must_use]
pub fn normalize(s: &str, casing: Casing) -> Option<String> {
    let cased = match casing {
        Casing::Pascal => to_pascal_case(s),
        Casing::Camel => to_camel_case(s),
        Casing::Snake => to_snake_case(s),
    };
    legalize(cased)
}

fn legalize(mut name: String) -> Option<String> {
    let first = name.chars().next()?;
    if first.is_numeric() {
        name.insert(0, '_');
    }
    Some(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
