use chrono::{DateTime, NaiveDate};

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `body`, never less than one.
pub fn reading_time(body: &str, words_per_minute: u32) -> u32 {
    let words = word_count(body) as u32;
    let minutes = words.div_ceil(words_per_minute.max(1));
    minutes.max(1)
}

/// Post dates are ISO strings, either plain dates or full RFC 3339 timestamps.
pub fn parse_post_date(buf: &str) -> Option<NaiveDate> {
    let buf = buf.trim();
    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Some(date_time.date_naive());
    }
    buf.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Same layout as the `ko-KR` locale, e.g. `2024. 1. 5.`
pub fn format_post_date(buf: &str) -> String {
    match parse_post_date(buf) {
        Some(date) => date.format("%Y. %-m. %-d.").to_string(),
        None => buf.to_string(),
    }
}
