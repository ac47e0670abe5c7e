//! Record generators, one module per output table.

pub mod events;
pub mod players;
pub mod teams;
pub mod users;
pub mod venues;

use std::sync::OnceLock;

use rand::Rng;
use rand::seq::IndexedRandom;
use regex::Regex;

pub(crate) const PHONE_PATTERN: &str = "(###) ###-####";

pub(crate) fn pick<R: Rng>(values: &[&'static str], rng: &mut R) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Lowercase ASCII letters and digits only.
pub(crate) fn slugify(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .flat_map(|ch| ch.to_lowercase())
        .collect()
}

/// Drop secondary-unit designators (`Apt 4`, `Suite 200`, ...) and stray
/// separators from a street line.
pub(crate) fn clean_street(street: &str) -> String {
    static SECONDARY: OnceLock<Option<Regex>> = OnceLock::new();
    let flattened = street.replace('\n', " ");
    let stripped = match SECONDARY
        .get_or_init(|| Regex::new(r"(?i)\b(?:Apt|Apartment|Suite|Ste|Unit)\b.*$|#.*$").ok())
    {
        Some(re) => re.replace(&flattened, "").into_owned(),
        None => flattened,
    };
    stripped.trim_matches(|ch: char| ch == ' ' || ch == ',').to_string()
}
