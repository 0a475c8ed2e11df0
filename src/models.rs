use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::constants::{DEFAULT_REMINDER_CRON, PHONE_PLACEHOLDER};
use crate::storage::{RecordStore, SubscriptionStore};
use crate::utils::schedule_utils::describe_cron;
use crate::utils::timezone::ReferenceZone;

/// One person's recurring birthday as stored in the roster file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub name: String,
    /// Month and day as `MM-DD`
    pub birthday: String,
    #[serde(default = "default_phone")]
    pub phone: String,
}

fn default_phone() -> String {
    PHONE_PLACEHOLDER.to_string()
}

impl BirthdayRecord {
    pub fn new(name: impl Into<String>, birthday: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into(),
            birthday: birthday.into(),
            phone: phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(default_phone),
        }
    }
}

/// A record matched inside a date window, with the concrete occurrence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedMatch {
    pub record: BirthdayRecord,
    /// Long-form rendering of `actual_date`
    pub date: String,
    pub actual_date: NaiveDate,
    /// Offset of `actual_date` from the reference day (negative for past windows)
    pub days_from_today: i64,
}

/// Bot state shared across all handlers and the scheduler
#[derive(Clone)]
pub struct Data {
    /// Birthday roster, re-read on every query
    pub store: RecordStore,
    /// Conversations receiving the daily reminder
    pub subscriptions: SubscriptionStore,
    /// Clock used to decide what "today" is
    pub zone: ReferenceZone,
    /// Cron expression of the daily reminder, for display
    pub reminder_cron: String,
    pub started_at: Instant,
}

impl Data {
    /// Create a new Data instance around the given stores
    pub fn new(store: RecordStore, subscriptions: SubscriptionStore, zone: ReferenceZone) -> Self {
        Self {
            store,
            subscriptions,
            zone,
            reminder_cron: DEFAULT_REMINDER_CRON.to_string(),
            started_at: Instant::now(),
        }
    }

    pub fn with_reminder_cron(mut self, cron_expression: &str) -> Self {
        self.reminder_cron = cron_expression.to_string();
        self
    }

    /// Human description of when the daily reminder goes out
    pub fn reminder_time(&self) -> String {
        format!("{}, {}", describe_cron(&self.reminder_cron), self.zone.label())
    }

    /// Today's date according to the configured clock
    pub fn today(&self) -> NaiveDate {
        self.zone.today()
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
