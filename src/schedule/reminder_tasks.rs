use chrono::NaiveDate;
use poise::serenity_prelude::ChannelId;
use tracing::{debug, error, info, warn};

use crate::models::Data;
use crate::notifier::Notifier;
use crate::services::BirthdayService;
use crate::utils::message_formatter::format_reminder;

/// Outcome of one reminder run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReminderReport {
    /// Number of birthdays tomorrow
    pub birthdays: usize,
    pub delivered: usize,
    pub failed: usize,
    /// Conversations dropped because the bot lost access to them
    pub removed: Vec<ChannelId>,
}

/// Send tomorrow's reminder to every subscribed conversation
pub async fn run_daily_reminder(data: &Data, notifier: &dyn Notifier) -> ReminderReport {
    run_reminder_for(data, notifier, data.today()).await
}

/// Send the reminder for the day after `today`
pub async fn run_reminder_for(
    data: &Data,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> ReminderReport {
    info!("Checking for birthdays the day after {}", today);

    let service = BirthdayService::new(&data.store);
    let people = service.tomorrows_birthdays(today).await;
    let mut report = ReminderReport {
        birthdays: people.len(),
        ..Default::default()
    };

    let Some(message) = format_reminder(&people) else {
        info!("No birthdays tomorrow - no reminders sent");
        return report;
    };

    info!("Found {} birthday(s) tomorrow", people.len());

    let conversations = data.subscriptions.conversations();
    if conversations.is_empty() {
        warn!("Birthdays tomorrow but no channel is subscribed; use /setgroup");
        return report;
    }

    for channel_id in conversations {
        if let Err(e) = notifier.typing(channel_id).await {
            debug!("Typing indicator failed: {}", e);
        }

        match notifier.send(channel_id, &message).await {
            Ok(()) => {
                report.delivered += 1;
                info!("Birthday reminder sent to channel {}", channel_id);
            }
            Err(e) if e.is_gone() => {
                report.failed += 1;
                warn!("{}; removing channel from reminders", e);
                match data.subscriptions.unsubscribe(channel_id).await {
                    Ok(_) => report.removed.push(channel_id),
                    Err(e) => error!("Failed to remove channel {}: {}", channel_id, e),
                }
            }
            Err(e) => {
                report.failed += 1;
                error!("Failed to send reminder: {}", e);
            }
        }
    }

    report
}
