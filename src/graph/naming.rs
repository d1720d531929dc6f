//! Naming-convention transforms for diagram identifiers.
//!
//! Both transforms split on runs of underscores or whitespace and drop empty
//! parts. Each part has its first character recased; the rest of a part is
//! lowercased only when it contains no lowercase letter (`ID` -> `Id`), so
//! existing humps like `camelCase` survive. The joined result goes through
//! the same word rule once more, which keeps both transforms idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\s]+").unwrap());

fn words(name: &str) -> impl Iterator<Item = &str> {
    WORD_SEPARATOR_RE.split(name).filter(|w| !w.is_empty())
}

/// `customer_orders` -> `CustomerOrders`, `ORDER_ID` -> `OrderId`
pub fn to_pascal_case(name: &str) -> String {
    let joined: String = words(name).map(capitalize).collect();
    capitalize(&joined)
}

/// `total_amount` -> `totalAmount`, `ID` -> `id`, `user_ID` -> `userId`
pub fn to_camel_case(name: &str) -> String {
    let mut parts = words(name);
    let mut joined = match parts.next() {
        Some(first) => decapitalize(first),
        None => return String::new(),
    };
    for part in parts {
        joined.push_str(&capitalize(part));
    }
    decapitalize(&joined)
}

fn capitalize(word: &str) -> String {
    recase_word(word, char::to_uppercase)
}

fn decapitalize(word: &str) -> String {
    recase_word(word, char::to_lowercase)
}

/// Map the first char (unless it expands to several chars); lowercase the
/// rest when the word starts with a cased letter and the rest has no
/// lowercase letter.
fn recase_word<I, F>(word: &str, f: F) -> String
where
    I: Iterator<Item = char> + ExactSizeIterator,
    F: Fn(char) -> I,
{
    let mut chars = word.chars();
    let Some(c) = chars.next() else {
        return String::new();
    };

    let mapped = f(c);
    let head = if mapped.len() == 1 {
        mapped.into_iter().next().unwrap_or(c)
    } else {
        c
    };
    let rest = chars.as_str();

    let mut out = String::with_capacity(word.len());
    out.push(head);
    if is_cased(head) && !rest.chars().any(char::is_lowercase) {
        out.push_str(&rest.to_lowercase());
    } else {
        out.push_str(rest);
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}
