use std::time::Duration;

/// `12.3s` under a minute, `H:MM:SS` otherwise.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 60.0 {
        return format!("{:.1}s", secs);
    }
    let whole = elapsed.as_secs();
    format!("{}:{:02}:{:02}", whole / 3600, (whole % 3600) / 60, whole % 60)
}

/// Thousands separated with commas.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
