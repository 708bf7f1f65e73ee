// src/format.rs
//! Pure formatting helpers. Everything here is a deterministic function of
//! its inputs; callers pass the reference instant explicitly.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

/// Human relative time against a reference instant: same day shows the
/// clock time, the previous day shows "Yesterday", anything else a coarse
/// distance ("3 days ago", "in 2 months").
pub fn format_relative_time(t: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if t.date_naive() == now.date_naive() {
        return t.format("%H:%M").to_string();
    }
    if t.date_naive() == now.date_naive() - Duration::days(1) {
        return "Yesterday".to_string();
    }

    let delta = now - t;
    let future = delta < Duration::zero();
    let distance = coarse_distance(delta.abs());
    if future {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

fn coarse_distance(delta: Duration) -> String {
    let minutes = delta.num_minutes();
    let hours = delta.num_hours();
    let days = delta.num_days();

    if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        plural(days / 365, "year")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

pub fn format_date(t: DateTime<Utc>) -> String {
    t.format("%B %-d, %Y").to_string()
}

/// Locale-naive currency rendering: known symbols, thousands separators,
/// two decimals. Unknown codes are prefixed verbatim.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => "",
    };

    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut int_part = String::new();
    let digits = whole.to_string();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            int_part.push(',');
        }
        int_part.push(c);
    }

    let sign = if negative { "-" } else { "" };
    if symbol.is_empty() {
        format!("{}{} {}.{:02}", sign, currency, int_part, frac)
    } else {
        format!("{}{}{}.{:02}", sign, symbol, int_part, frac)
    }
}

/// Binary-prefix file sizes: 1536 bytes renders as "1.5 KB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut i = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && i < UNITS.len() - 1 {
        value /= 1024.0;
        i += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let mut s = format!("{:.2}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    format!("{} {}", s, UNITS[i])
}

/// Truncate to at most `max_chars` characters, appending an ellipsis when
/// anything was cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a title to a URL-safe slug: lowercase ASCII alphanumerics with
/// single hyphens, no leading or trailing hyphen.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true; // Start true to trim leading hyphens

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Group items by a derived key, preserving per-group insertion order.
pub fn group_by<T, K, F>(items: &[T], mut key: F) -> BTreeMap<K, Vec<&T>>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}
