use poise::CreateReply;
use tracing::{error, info};

use crate::{
    constants::MAX_MESSAGE_LENGTH,
    models::{Context, Error},
    notifier::DiscordNotifier,
    schedule::run_daily_reminder,
    services::{BirthdayService, WindowKind},
    storage::StoreError,
    utils::messages::{build_invalid_input_error, format_error, format_success, format_warning, truncate_message},
    utils::validation::{normalize_birthday, require_name},
};

/// Show this week's birthdays
#[poise::command(slash_command, rename = "thisweek")]
pub async fn this_week(ctx: Context<'_>) -> Result<(), Error> {
    send_summary(ctx, WindowKind::ThisWeek).await
}

/// Show next week's birthdays
#[poise::command(slash_command, rename = "nextweek")]
pub async fn next_week(ctx: Context<'_>) -> Result<(), Error> {
    send_summary(ctx, WindowKind::NextWeek).await
}

/// Show previous month's birthdays
#[poise::command(slash_command, rename = "prevmonth")]
pub async fn previous_month(ctx: Context<'_>) -> Result<(), Error> {
    send_summary(ctx, WindowKind::PreviousMonth).await
}

/// Load, select, format and reply with one summary view
async fn send_summary(ctx: Context<'_>, kind: WindowKind) -> Result<(), Error> {
    ctx.defer().await?;

    let data = ctx.data();
    let message = BirthdayService::new(&data.store)
        .summary(kind, data.today())
        .await;

    ctx.say(truncate_message(&message, MAX_MESSAGE_LENGTH)).await?;
    info!("Sent {} to channel {}", kind.subject(), ctx.channel_id());
    Ok(())
}

/// Add someone to the birthday list
#[poise::command(slash_command, rename = "addbirthday", required_permissions = "MANAGE_GUILD")]
pub async fn add_birthday(
    ctx: Context<'_>,
    #[description = "Name to show in reminders"] name: String,
    #[description = "Birthday as MM-DD, e.g. 07-02"] birthday: String,
    #[description = "Contact phone number (optional)"] phone: Option<String>,
) -> Result<(), Error> {
    let (name, birthday) = match (require_name(&name), normalize_birthday(&birthday)) {
        (Ok(name), Ok(birthday)) => (name.to_string(), birthday),
        (Err(e), _) | (_, Err(e)) => {
            ctx.say(format_error(&e.to_string())).await?;
            return Ok(());
        }
    };

    let service = BirthdayService::new(&ctx.data().store);
    match service.add_birthday(&name, &birthday, phone).await {
        Ok(record) => {
            ctx.say(format_success(&format!(
                "Saved **{}** with birthday {}",
                record.name, record.birthday
            )))
            .await?;
        }
        Err(StoreError::InvalidRecord(reason)) => {
            ctx.say(build_invalid_input_error("birthday", &reason)).await?;
        }
        Err(e) => {
            error!("Failed to add birthday for {}: {}", name, e);
            ctx.say(format_error("Failed to save the birthday. Please try again."))
                .await?;
        }
    }

    Ok(())
}

/// Send tomorrow's reminder to all subscribed channels now
#[poise::command(slash_command, rename = "sendreminders", required_permissions = "MANAGE_GUILD")]
pub async fn send_reminders(ctx: Context<'_>) -> Result<(), Error> {
    if ctx.data().subscriptions.is_empty() {
        ctx.say(format_warning(
            "No channel is set for birthday reminders yet. Use `/setgroup` first.",
        ))
        .await?;
        return Ok(());
    }

    ctx.defer().await?;

    let notifier = DiscordNotifier::new(ctx.serenity_context().http.clone());
    let report = run_daily_reminder(ctx.data(), &notifier).await;

    let reply = if report.birthdays == 0 {
        "📅 No birthdays tomorrow - no reminders sent".to_string()
    } else {
        format_success(&format!(
            "Reminder for {} birthday(s) sent to {} channel(s) ({} failed, {} removed)",
            report.birthdays,
            report.delivered,
            report.failed,
            report.removed.len()
        ))
    };

    ctx.send(CreateReply::default().content(reply).ephemeral(true))
        .await?;
    Ok(())
}
