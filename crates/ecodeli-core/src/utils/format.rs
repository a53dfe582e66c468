use chrono::{DateTime, Local};

/// Format a price in cents as euros, e.g. `1250` -> "12.50€"
pub fn format_price(price_in_cents: Option<i64>) -> String {
    match price_in_cents {
        Some(cents) => {
            let sign = if cents < 0 { "-" } else { "" };
            let cents = cents.unsigned_abs();
            format!("{}{}.{:02}€", sign, cents / 100, cents % 100)
        }
        None => "Prix à définir".to_string(),
    }
}

/// Format a duration in minutes, e.g. "1h 30min", "2h" or "45min"
pub fn format_duration(minutes: f64) -> String {
    let total = if minutes.is_finite() { minutes.max(0.0) as u64 } else { 0 };
    let (hours, minutes) = (total / 60, total % 60);
    match (hours, minutes) {
        (0, m) => format!("{}min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}

/// Format an RFC 3339 timestamp as "05 Mar 2025" in local time
pub fn format_date(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) => dt.with_timezone(&Local).format("%d %b %Y").to_string(),
        Err(_) => date.chars().take(10).collect(),
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
