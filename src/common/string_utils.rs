//! String utility functions for registration-name casing.
//!
//! Names derived from paths (apps, config keys, view namespaces) are re-cased
//! one `.`-delimited segment at a time so that `my_app1.sub_dir` and
//! `MyApp1.SubDir` converge on the same spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The casing styles a registration name can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    #[default]
    Snake,
    Kebab,
    Camel,
    Pascal,
}

impl CaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseType::Snake => "snake",
            CaseType::Kebab => "kebab",
            CaseType::Camel => "camel",
            CaseType::Pascal => "pascal",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snake" => Ok(CaseType::Snake),
            "kebab" => Ok(CaseType::Kebab),
            "camel" => Ok(CaseType::Camel),
            "pascal" => Ok(CaseType::Pascal),
            other => Err(format!(
                "unknown case '{other}' (expected snake, kebab, camel or pascal)"
            )),
        }
    }
}

/// Convert every `.`-delimited segment of `value` to the given case.
///
/// Existing `_` and `-` separators are treated as word breaks first, so the
/// conversion is idempotent.
///
/// # Examples
/// ```
/// use autoreg::common::string_utils::{change_case, CaseType};
/// assert_eq!(change_case("abcDef.ghiJlk", CaseType::Snake), "abc_def.ghi_jlk");
/// assert_eq!(change_case("abc_def.ghi_jlk", CaseType::Kebab), "abc-def.ghi-jlk");
/// assert_eq!(change_case("abc def.ghi jlk", CaseType::Pascal), "AbcDef.GhiJlk");
/// ```
pub fn change_case(value: &str, case: CaseType) -> String {
    value
        .replace(['_', '-'], " ")
        .split('.')
        .map(|segment| match case {
            CaseType::Snake => snake(segment, "_"),
            CaseType::Kebab => snake(segment, "-"),
            CaseType::Camel => camel(segment),
            CaseType::Pascal => capitalize_word(&camel(segment)),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Snake-case a single word run, joining words with `delimiter`.
///
/// Values made only of lowercase letters are returned untouched. Otherwise
/// each whitespace-separated word is capitalized, whitespace is removed and
/// the delimiter is inserted before every uppercase letter that follows
/// another character.
///
/// # Examples
/// ```
/// use autoreg::common::string_utils::snake;
/// assert_eq!(snake("MyApp1", "_"), "my_app1");
/// assert_eq!(snake("some other", "-"), "some-other");
/// assert_eq!(snake("plain", "_"), "plain");
/// ```
pub fn snake(value: &str, delimiter: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_lowercase()) {
        return value.to_string();
    }

    let joined: String = uppercase_words(value)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut result = String::with_capacity(joined.len() + 4);
    for (i, c) in joined.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            result.push_str(delimiter);
        }
        result.push(c);
    }
    result.to_lowercase()
}

/// `StudlyCase` a value: `-` and `_` become word breaks and every word is capitalized.
pub fn studly(value: &str) -> String {
    uppercase_words(&value.replace(['-', '_'], " ")).replace(' ', "")
}

/// `camelCase` a value.
pub fn camel(value: &str) -> String {
    lowercase_first(&studly(value))
}

/// Capitalize the first letter of a word
///
/// Converts the first character to uppercase and leaves the rest unchanged.
/// Returns an empty string if the input is empty.
///
/// # Examples
/// ```
/// use autoreg::common::string_utils::capitalize_word;
/// assert_eq!(capitalize_word("hello"), "Hello");
/// assert_eq!(capitalize_word("HELLO"), "HELLO");
/// assert_eq!(capitalize_word(""), "");
/// ```
pub fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize the first character of every whitespace-delimited word.
fn uppercase_words(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start && !c.is_whitespace() {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    result
}
