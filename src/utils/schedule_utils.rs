/// Pure cron description helpers (Discord-agnostic)

/// Extract a plain numeric field from a six-field cron expression
/// Cron format: "second minute hour day month weekday"
fn cron_field(cron_expr: &str, index: usize) -> Option<u32> {
    let parts: Vec<&str> = cron_expr.split_whitespace().collect();
    if parts.len() != 6 {
        return None;
    }
    parts[index].parse().ok()
}

/// Check whether a cron expression fires once a day at a fixed time
fn is_daily(cron_expr: &str) -> bool {
    let parts: Vec<&str> = cron_expr.split_whitespace().collect();
    parts.len() == 6 && parts[3..].iter().all(|p| *p == "*" || *p == "?")
}

/// Format time as HH:MM
pub fn format_time_hhmm(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Describe when a reminder cron fires, e.g. "daily at 09:00"
pub fn describe_cron(cron_expr: &str) -> String {
    let time = cron_field(cron_expr, 2).zip(cron_field(cron_expr, 1));
    match time {
        Some((hour, minute)) if is_daily(cron_expr) && hour < 24 && minute < 60 => {
            format!("daily at {}", format_time_hhmm(hour, minute))
        }
        _ => format!("on schedule `{}`", cron_expr.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_hhmm() {
        assert_eq!(format_time_hhmm(8, 30), "08:30");
        assert_eq!(format_time_hhmm(23, 5), "23:05");
        assert_eq!(format_time_hhmm(0, 0), "00:00");
    }

    #[test]
    fn test_describe_daily_cron() {
        assert_eq!(describe_cron("0 0 9 * * *"), "daily at 09:00");
        assert_eq!(describe_cron("0 30 18 * * ?"), "daily at 18:30");
    }

    #[test]
    fn test_describe_other_cron() {
        assert_eq!(describe_cron("0 0 9 * * MON"), "on schedule `0 0 9 * * MON`");
        assert_eq!(describe_cron("0 */5 * * * *"), "on schedule `0 */5 * * * *`");
        assert_eq!(describe_cron("invalid"), "on schedule `invalid`");
    }
}
