//! Description tokenization shared by the framework conventions.

/// Split a description into words: whitespace-separated, with every
/// non-alphanumeric character removed, empty words dropped.
pub fn words(description: &str) -> Vec<String> {
    description
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Upper-case the first character, keep the rest as written.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `["return", "true"]` -> `ReturnTrue`
pub fn camel_suffix(words: &[String]) -> String {
    words.iter().map(|w| capitalize(w)).collect()
}

/// `["return", "True"]` -> `_return_true`
pub fn underscore_suffix(words: &[String]) -> String {
    words
        .iter()
        .map(|w| format!("_{}", w.to_lowercase()))
        .collect()
}
