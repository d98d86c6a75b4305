use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEAD_IN: Regex = Regex::new(r"(?i)^\s*i (just |had |ate )?").unwrap();
    static ref SEPARATOR: Regex = Regex::new(r"(?i),| and ").unwrap();
    static ref TRAILING_PUNCT: Regex = Regex::new(r"[.!?]$").unwrap();
}

/// Splits a spoken sentence such as "I had rice, dal and roti." into food items.
pub fn parse_transcript(transcript: &str) -> Vec<String> {
    let stripped = LEAD_IN.replace(transcript, "");
    let items: Vec<String> = SEPARATOR
        .split(&stripped)
        .map(|s| TRAILING_PUNCT.replace(s.trim(), "").into_owned())
        .filter(|s| !s.is_empty())
        .map(|s| capitalize(&s))
        .collect();
    if items.is_empty() && !transcript.trim().is_empty() {
        return vec![transcript.trim().to_string()];
    }
    items
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
