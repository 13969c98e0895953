//! Small helpers UI surfaces apply to content before display.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use cjk_core::models::{Activity, BlogPost, NewsItem};

const UNKNOWN_DATE: &str = "Date à confirmer";
const DEFAULT_EXCERPT_LEN: usize = 160;

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Absolute URL for an image reference. Absolute `http(s)` URLs pass through;
/// relative paths are joined onto `base_url`.
pub fn resolve_image_url(base_url: &str, image: Option<&str>) -> Option<String> {
    let image = image.filter(|i| !i.is_empty())?;
    if image.starts_with("http://") || image.starts_with("https://") {
        return Some(image.to_string());
    }
    let base = base_url.trim_end_matches('/');
    if image.starts_with('/') {
        Some(format!("{base}{image}"))
    } else {
        Some(format!("{base}/{image}"))
    }
}

/// Whitespace-collapsed text cut to at most `max_chars` characters, ending
/// in `…` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() <= max_chars {
        return normalized;
    }
    let mut cut: String = normalized.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// [`excerpt`] with the card length used across listing pages.
pub fn card_excerpt(text: &str) -> String {
    excerpt(text, DEFAULT_EXCERPT_LEN)
}

/// Long-form French date, e.g. `02 mars 2025`. Accepts RFC 3339 timestamps
/// and plain `YYYY-MM-DD` dates.
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = parse_date(date) else {
        return UNKNOWN_DATE.to_string();
    };
    let month = MONTHS_FR[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.filter(|r| !r.is_empty())?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

fn timestamp_millis(raw: Option<&str>) -> i64 {
    raw.and_then(|r| DateTime::parse_from_rfc3339(r).ok())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Content carrying a creation timestamp.
pub trait Dated {
    fn created_at(&self) -> Option<&str>;
}

impl Dated for BlogPost {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Dated for NewsItem {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Dated for Activity {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

/// Newest first. Items without a readable timestamp sort last; ties keep
/// their input order.
pub fn sort_by_date_desc<T: Dated>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(timestamp_millis(item.created_at())));
    items
}

/// Activities keyed by `activity_type`, each group in input order.
pub fn group_activities_by_type(items: Vec<Activity>) -> BTreeMap<String, Vec<Activity>> {
    let mut groups: BTreeMap<String, Vec<Activity>> = BTreeMap::new();
    for item in items {
        groups.entry(item.activity_type.clone()).or_default().push(item);
    }
    groups
}

/// Display label for an activity type.
pub fn activity_label(kind: &str) -> &'static str {
    match kind {
        "sport" => "Sport",
        "culture" => "Culture",
        "formation" => "Formation",
        "paix" => "Paix & Réconciliation",
        "autre" => "Autre",
        _ => "Activité",
    }
}
