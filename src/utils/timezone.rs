use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Error types for timezone operations
#[derive(Debug, thiserror::Error)]
pub enum TimezoneError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// The wall clock that decides what "today" means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceZone {
    /// Local time of the host process
    Local,
    /// A pinned IANA zone
    Named(Tz),
}

impl ReferenceZone {
    /// Build from an optional IANA name; `None` or blank keeps host time
    pub fn from_name(name: Option<&str>) -> Result<Self, TimezoneError> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => parse_timezone(name).map(ReferenceZone::Named),
            None => Ok(ReferenceZone::Local),
        }
    }

    /// Calendar date in this zone at the given instant
    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            ReferenceZone::Local => instant.with_timezone(&Local).date_naive(),
            ReferenceZone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    /// Today's date in this zone
    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }

    /// Current time rendered for humans
    pub fn now_display(&self) -> String {
        let now = Utc::now();
        match self {
            ReferenceZone::Local => now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
            ReferenceZone::Named(tz) => {
                now.with_timezone(tz).format("%Y-%m-%d %H:%M:%S %Z").to_string()
            }
        }
    }

    /// Next instant after `after` matching the cron schedule, in this zone
    pub fn next_fire(
        &self,
        schedule: &cron::Schedule,
        after: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        match self {
            ReferenceZone::Local => next_in_zone(schedule, &after.with_timezone(&Local)),
            ReferenceZone::Named(tz) => next_in_zone(schedule, &after.with_timezone(tz)),
        }
    }

    /// Short label for logs and the status message
    pub fn label(&self) -> String {
        match self {
            ReferenceZone::Local => "host local time".to_string(),
            ReferenceZone::Named(tz) => tz.name().to_string(),
        }
    }
}

fn next_in_zone<Z: TimeZone>(schedule: &cron::Schedule, after: &DateTime<Z>) -> Option<DateTime<Utc>> {
    schedule
        .after(after)
        .next()
        .map(|next| next.with_timezone(&Utc))
}

/// Parse a timezone string
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimezoneError> {
    tz_str.parse().map_err(|_| TimezoneError::InvalidTimezone(tz_str.to_string()))
}
