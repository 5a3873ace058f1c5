use chrono::{DateTime, NaiveDate, Utc};

/// Calendar date in long English form, e.g. "15 June 2024".
pub fn format_long_date(date: &NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// "Jun 2024", for gallery captions.
pub fn format_short_date(date: &NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Format a timestamp as a human-readable relative time string.
pub fn relative_time(dt: &DateTime<Utc>) -> String {
    let seconds = Utc::now().signed_duration_since(dt).num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    format!("{}d ago", hours / 24)
}
