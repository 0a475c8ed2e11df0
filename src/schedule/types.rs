use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::time::Duration;

use crate::utils::timezone::ReferenceZone;

/// Schedule error types
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },
}

/// A named recurring job time
#[derive(Debug, Clone)]
pub struct Schedule {
    pub name: String,
    pub cron_expression: String, // Cron expression (e.g., "0 0 9 * * *" for 9 AM daily)
    cron: cron::Schedule,
}

impl Schedule {
    /// Parse a six-field cron expression
    pub fn parse(name: &str, cron_expression: &str) -> Result<Self, ScheduleError> {
        let cron = cron::Schedule::from_str(cron_expression).map_err(|e| {
            ScheduleError::InvalidCron {
                expression: cron_expression.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            name: name.to_string(),
            cron_expression: cron_expression.to_string(),
            cron,
        })
    }

    /// Next fire time strictly after `now`, evaluated on the zone's wall clock
    pub fn next_after(&self, zone: &ReferenceZone, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        zone.next_fire(&self.cron, now)
    }

    /// Fire time strictly after both `last_fire` and `now`
    ///
    /// An instant that already fired is never returned again, even when the
    /// wall clock still reads slightly before it.
    pub fn following(
        &self,
        zone: &ReferenceZone,
        last_fire: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let anchor = last_fire.map_or(now, |fired| fired.max(now));
        self.next_after(zone, anchor)
    }
}

/// How long to sleep from `now` until `next`
pub fn wait_until(next: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (next - now).to_std().unwrap_or(Duration::ZERO)
}
