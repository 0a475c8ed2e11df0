/// Pure date utility functions (Discord-agnostic)
use chrono::{Datelike, NaiveDate};

/// Check if a given year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Validate if a month/day combination is valid
pub fn is_valid_date(month: u32, day: u32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }

    let max_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 29, // Allow Feb 29 for leap years
        _ => return false,
    };

    (1..=max_day).contains(&day)
}

/// Number of days in a given month of a given year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Format a month/day pair as the stored `MM-DD` key
pub fn format_month_day(month: u32, day: u32) -> String {
    format!("{:02}-{:02}", month, day)
}

/// The `MM-DD` key of a concrete date
pub fn month_day_key(date: NaiveDate) -> String {
    format_month_day(date.month(), date.day())
}

/// Parse a strict `MM-DD` string into (month, day)
pub fn parse_month_day(value: &str) -> Option<(u32, u32)> {
    let (month, day) = value.split_once('-')?;
    if month.len() != 2 || day.len() != 2 {
        return None;
    }
    if !month.bytes().chain(day.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    is_valid_date(month, day).then_some((month, day))
}

/// Year and month of the calendar month before `today`'s
pub fn previous_month_of(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

/// Long-form date, e.g. "Monday, July 1"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Month and year, e.g. "February 2024"
pub fn format_month_year(year: i32, month: u32) -> String {
    format!("{} {}", get_month_name(month), year)
}

/// Get month name from month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
