/// Pure functions for birthday message formatting (Discord-agnostic)
use crate::models::{AnnotatedMatch, BirthdayRecord};

/// Build the title line shared by the summary messages
fn build_title(title: &str) -> String {
    format!("📅 **{}**", title)
}

/// Suffix marking matches that are today or tomorrow
pub fn day_indicator(days_from_today: i64) -> &'static str {
    match days_from_today {
        0 => " (Today!)",
        1 => " (Tomorrow!)",
        _ => "",
    }
}

/// Build a single summary entry
fn build_match_entry(name: &str, date: &str, indicator: &str) -> String {
    format!("🎂 **{}**\n   📆 {}{}\n\n", name, date, indicator)
}

/// Format a week summary
pub fn format_weekly(matches: &[AnnotatedMatch], title: &str) -> String {
    if matches.is_empty() {
        return format!(
            "{}\n\nNo birthdays scheduled for this period 🎈",
            build_title(title)
        );
    }

    let entries: String = matches
        .iter()
        .map(|m| build_match_entry(&m.record.name, &m.date, day_indicator(m.days_from_today)))
        .collect();

    format!(
        "{}\n\n{}Don't forget to celebrate! 🎉",
        build_title(title),
        entries
    )
}

/// Format a month summary, ending with the number of birthdays
pub fn format_monthly(matches: &[AnnotatedMatch], title: &str) -> String {
    if matches.is_empty() {
        return format!("{}\n\nNo birthdays in this period 🎈", build_title(title));
    }

    let entries: String = matches
        .iter()
        .map(|m| build_match_entry(&m.record.name, &m.date, ""))
        .collect();

    format!(
        "{}\n\n{}{}",
        build_title(title),
        entries,
        format_total(matches.len())
    )
}

/// "Total: 1 birthday" / "Total: 3 birthdays"
pub fn format_total(count: usize) -> String {
    let noun = if count == 1 { "birthday" } else { "birthdays" };
    format!("Total: {} {}", count, noun)
}

/// Format the daily reminder; `None` means there is nothing to send
pub fn format_reminder(people: &[BirthdayRecord]) -> Option<String> {
    if people.is_empty() {
        return None;
    }

    let names: String = people
        .iter()
        .map(|person| format!("🎂 **{}**\n", person.name))
        .collect();

    Some(format!(
        "{}\n\nTomorrow is the birthday of:\n\n{}\n{}",
        build_reminder_header(),
        names,
        build_reminder_footer()
    ))
}

/// Header of the daily reminder
pub fn build_reminder_header() -> String {
    "🎉 **Birthday Reminder** 🎉".to_string()
}

/// Footer of the daily reminder
pub fn build_reminder_footer() -> String {
    "Don't forget to wish them a happy birthday! 🎈".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn matched(name: &str, date: &str, days_from_today: i64) -> AnnotatedMatch {
        AnnotatedMatch {
            record: BirthdayRecord::new(name, "03-15", None),
            date: date.to_string(),
            actual_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            days_from_today,
        }
    }

    #[test]
    fn test_day_indicator() {
        assert_eq!(day_indicator(0), " (Today!)");
        assert_eq!(day_indicator(1), " (Tomorrow!)");
        assert_eq!(day_indicator(2), "");
        assert_eq!(day_indicator(-3), "");
    }

    #[test]
    fn test_format_weekly_empty() {
        let message = format_weekly(&[], "This Week's Birthdays");
        assert_eq!(
            message,
            "📅 **This Week's Birthdays**\n\nNo birthdays scheduled for this period 🎈"
        );
    }

    #[test]
    fn test_format_weekly_with_matches() {
        let matches = vec![
            matched("Ada", "Friday, March 15", 0),
            matched("Bob", "Saturday, March 16", 1),
            matched("Cy", "Monday, March 18", 3),
        ];
        let message = format_weekly(&matches, "This Week's Birthdays");

        assert!(message.starts_with("📅 **This Week's Birthdays**\n\n"));
        assert!(message.contains("🎂 **Ada**\n   📆 Friday, March 15 (Today!)\n"));
        assert!(message.contains("🎂 **Bob**\n   📆 Saturday, March 16 (Tomorrow!)\n"));
        assert!(message.contains("🎂 **Cy**\n   📆 Monday, March 18\n"));
        assert!(message.ends_with("Don't forget to celebrate! 🎉"));
    }

    #[test]
    fn test_format_monthly_empty() {
        let message = format_monthly(&[], "Previous Month's Birthdays (February 2024)");
        assert!(message.contains("**Previous Month's Birthdays (February 2024)**"));
        assert!(message.ends_with("No birthdays in this period 🎈"));
    }

    #[test]
    fn test_format_monthly_singular_total() {
        let matches = vec![matched("Ada", "Thursday, February 29", -1)];
        let message = format_monthly(&matches, "March 2024");

        assert!(message.contains("🎂 **Ada**\n   📆 Thursday, February 29\n"));
        assert!(!message.contains("(Today!)"));
        assert!(message.ends_with("Total: 1 birthday"));
    }

    #[test]
    fn test_format_monthly_plural_total() {
        let matches = vec![
            matched("Ada", "Thursday, February 1", -29),
            matched("Bob", "Thursday, February 29", -1),
        ];
        let message = format_monthly(&matches, "March 2024");
        assert!(message.ends_with("Total: 2 birthdays"));
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(0), "Total: 0 birthdays");
        assert_eq!(format_total(1), "Total: 1 birthday");
        assert_eq!(format_total(12), "Total: 12 birthdays");
    }

    #[test]
    fn test_format_reminder_empty_is_none() {
        assert_eq!(format_reminder(&[]), None);
    }

    #[test]
    fn test_format_reminder_lists_names() {
        let people = vec![
            BirthdayRecord::new("Ada", "07-02", None),
            BirthdayRecord::new("Grace", "07-02", None),
        ];
        let message = format_reminder(&people).unwrap();

        assert!(message.starts_with("🎉 **Birthday Reminder** 🎉\n\nTomorrow is the birthday of:\n\n"));
        assert!(message.contains("🎂 **Ada**\n🎂 **Grace**\n"));
        assert!(message.ends_with("\nDon't forget to wish them a happy birthday! 🎈"));
    }
}
