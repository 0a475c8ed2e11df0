/// Birthday service - ties the roster, the window selector and the formatter together
use chrono::NaiveDate;

use super::window::{next_week, previous_month, previous_month_title, this_week, tomorrow};
use crate::models::BirthdayRecord;
use crate::storage::{RecordStore, StoreError};
use crate::utils::message_formatter::{format_monthly, format_reminder, format_weekly};

/// The summary views a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    ThisWeek,
    NextWeek,
    PreviousMonth,
}

impl WindowKind {
    pub const ALL: [WindowKind; 3] = [
        WindowKind::ThisWeek,
        WindowKind::NextWeek,
        WindowKind::PreviousMonth,
    ];

    /// Button id, matching the command name
    pub fn custom_id(self) -> &'static str {
        match self {
            WindowKind::ThisWeek => "thisweek",
            WindowKind::NextWeek => "nextweek",
            WindowKind::PreviousMonth => "prevmonth",
        }
    }

    pub fn from_custom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.custom_id() == id)
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            WindowKind::ThisWeek => "📅 This Week",
            WindowKind::NextWeek => "🗓️ Next Week",
            WindowKind::PreviousMonth => "📋 Previous Month",
        }
    }

    /// What the view shows, for log lines and apologies
    pub fn subject(self) -> &'static str {
        match self {
            WindowKind::ThisWeek => "this week's birthdays",
            WindowKind::NextWeek => "next week's birthdays",
            WindowKind::PreviousMonth => "previous month's birthdays",
        }
    }
}

/// Render one summary view for the given roster and reference date
pub fn render_window(kind: WindowKind, records: &[BirthdayRecord], today: NaiveDate) -> String {
    match kind {
        WindowKind::ThisWeek => format_weekly(&this_week(records, today), "This Week's Birthdays"),
        WindowKind::NextWeek => format_weekly(&next_week(records, today), "Next Week's Birthdays"),
        WindowKind::PreviousMonth => format_monthly(
            &previous_month(records, today),
            &format!(
                "Previous Month's Birthdays ({})",
                previous_month_title(today)
            ),
        ),
    }
}

/// Service for birthday-related operations
pub struct BirthdayService<'a> {
    store: &'a RecordStore,
}

impl<'a> BirthdayService<'a> {
    /// Create a new birthday service
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Load the roster and render a summary view
    pub async fn summary(&self, kind: WindowKind, today: NaiveDate) -> String {
        let records = self.store.load().await;
        render_window(kind, &records, today)
    }

    /// Everyone whose birthday is the day after `today`
    pub async fn tomorrows_birthdays(&self, today: NaiveDate) -> Vec<BirthdayRecord> {
        let records = self.store.load().await;
        tomorrow(&records, today)
    }

    /// The daily reminder text, or `None` when nobody has a birthday tomorrow
    pub async fn reminder(&self, today: NaiveDate) -> Option<String> {
        format_reminder(&self.tomorrows_birthdays(today).await)
    }

    /// Add someone to the roster
    pub async fn add_birthday(
        &self,
        name: &str,
        birthday: &str,
        phone: Option<String>,
    ) -> Result<BirthdayRecord, StoreError> {
        self.store.append(name, birthday, phone).await
    }

    /// Number of records currently on file
    pub async fn count(&self) -> usize {
        self.store.load().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_custom_id_round_trip() {
        for kind in WindowKind::ALL {
            assert_eq!(WindowKind::from_custom_id(kind.custom_id()), Some(kind));
        }
        assert_eq!(WindowKind::from_custom_id("help"), None);
    }

    #[test]
    fn test_render_previous_month_title() {
        let records = vec![BirthdayRecord::new("Ada", "02-29", None)];
        let message = render_window(WindowKind::PreviousMonth, &records, date(2024, 3, 1));

        assert!(message.contains("**Previous Month's Birthdays (February 2024)**"));
        assert!(message.contains("Thursday, February 29"));
        assert!(message.ends_with("Total: 1 birthday"));
    }

    #[test]
    fn test_render_weeks_use_their_own_titles() {
        let records = vec![BirthdayRecord::new("Ada", "03-16", None)];
        let today = date(2024, 3, 15);

        let this = render_window(WindowKind::ThisWeek, &records, today);
        assert!(this.contains("This Week's Birthdays"));
        assert!(this.contains("Saturday, March 16 (Tomorrow!)"));

        let next = render_window(WindowKind::NextWeek, &records, today);
        assert!(next.contains("Next Week's Birthdays"));
        assert!(next.contains("No birthdays scheduled for this period"));
    }

    #[tokio::test]
    async fn test_service_reads_fresh_roster_each_call() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("birthdays.json"));
        let service = BirthdayService::new(&store);
        let today = date(2024, 7, 1);

        assert_eq!(service.reminder(today).await, None);

        service.add_birthday("Ada", "07-02", None).await.unwrap();
        let reminder = service.reminder(today).await.unwrap();
        assert!(reminder.contains("**Ada**"));
        assert_eq!(service.count().await, 1);
    }
}
