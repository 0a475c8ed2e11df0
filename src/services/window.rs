/// Date-window selection over the birthday roster (pure, clock injected)
use chrono::{Days, NaiveDate};

use crate::models::{AnnotatedMatch, BirthdayRecord};
use crate::utils::datetime::{
    days_in_month, format_long_date, format_month_year, month_day_key, previous_month_of,
};

/// Records whose birthday falls on the day after `today`, in input order
pub fn tomorrow(records: &[BirthdayRecord], today: NaiveDate) -> Vec<BirthdayRecord> {
    let Some(next_day) = today.checked_add_days(Days::new(1)) else {
        return Vec::new();
    };
    let key = month_day_key(next_day);

    records
        .iter()
        .filter(|record| record.birthday == key)
        .cloned()
        .collect()
}

/// Records falling in the `length` days that start `start_offset` days after `today`
///
/// Each match carries its offset from `today`; output is ordered by that
/// offset and keeps roster order within a day.
pub fn week_window(
    records: &[BirthdayRecord],
    today: NaiveDate,
    start_offset: u32,
    length: u32,
) -> Vec<AnnotatedMatch> {
    let mut matches: Vec<AnnotatedMatch> = (start_offset..start_offset.saturating_add(length))
        .filter_map(|offset| {
            today
                .checked_add_days(Days::new(offset as u64))
                .map(|day| (offset, day))
        })
        .flat_map(|(offset, day)| matches_on(records, day, offset as i64))
        .collect();

    // Stable: equal offsets keep scan order
    matches.sort_by_key(|m| m.days_from_today);
    matches
}

/// The seven days starting today
pub fn this_week(records: &[BirthdayRecord], today: NaiveDate) -> Vec<AnnotatedMatch> {
    week_window(records, today, 0, crate::constants::WEEK_LENGTH)
}

/// The seven days after this week
pub fn next_week(records: &[BirthdayRecord], today: NaiveDate) -> Vec<AnnotatedMatch> {
    let length = crate::constants::WEEK_LENGTH;
    week_window(records, today, length, length)
}

/// Records falling in the calendar month before `today`'s, ordered by date
pub fn previous_month(records: &[BirthdayRecord], today: NaiveDate) -> Vec<AnnotatedMatch> {
    let (year, month) = previous_month_of(today);

    let mut matches: Vec<AnnotatedMatch> = (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .flat_map(|date| {
            let offset = (date - today).num_days();
            matches_on(records, date, offset)
        })
        .collect();

    matches.sort_by_key(|m| m.actual_date);
    matches
}

/// "February 2024" for a reference date in March 2024
pub fn previous_month_title(today: NaiveDate) -> String {
    let (year, month) = previous_month_of(today);
    format_month_year(year, month)
}

fn matches_on(records: &[BirthdayRecord], date: NaiveDate, offset: i64) -> Vec<AnnotatedMatch> {
    let key = month_day_key(date);
    records
        .iter()
        .filter(|record| record.birthday == key)
        .map(|record| AnnotatedMatch {
            record: record.clone(),
            date: format_long_date(date),
            actual_date: date,
            days_from_today: offset,
        })
        .collect()
}
