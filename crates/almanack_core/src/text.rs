use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;

static ARTICLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(the|an?)\b").expect("valid regex"));
static PA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bpa\b").expect("valid regex"));
static POSSESSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'s\b").expect("valid regex"));
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Joins names for a byline: `A`, `A and B`, `A, B and C`.
pub fn comma_and<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [head @ .., last] => {
            let commas = head.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ");
            format!("{commas} and {}", last.as_ref())
        }
    }
}

/// Derives a URL slug from a headline.
///
/// English articles are dropped, "pa" becomes "pennsylvania", possessive
/// "'s" is removed and every run of non-word characters becomes one hyphen.
pub fn derive_slug(headline: &str) -> String {
    let lowered = headline
        .to_lowercase()
        .replace("â€™", "'")
        .replace('\u{2019}', "'");
    let without_articles = ARTICLES.replace_all(&lowered, " ");
    let expanded = PA.replace_all(&without_articles, "pennsylvania");
    let without_possessive = POSSESSIVE.replace_all(&expanded, "");
    let spaced = NON_WORD.replace_all(&without_possessive, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Formats an integer with thousands separators (`12345` → `12,345`).
pub fn intcomma(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a date in AP style with the weekday: `Monday, Jan. 2, 2023`.
pub fn format_ap_date(date: NaiveDate) -> String {
    let weekday = match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    let month = match date.month() {
        1 => "Jan.",
        2 => "Feb.",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "Aug.",
        9 => "Sept.",
        10 => "Oct.",
        11 => "Nov.",
        _ => "Dec.",
    };
    format!("{weekday}, {month} {}, {}", date.day(), date.year())
}
