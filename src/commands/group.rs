use poise::CreateReply;
use poise::serenity_prelude::{ButtonStyle, CreateActionRow, CreateButton};
use tracing::{error, info};

use crate::{
    models::{Context, Error},
    services::{BirthdayService, WindowKind},
    utils::messages::{
        StatusInfo, build_help_message, build_status_message, build_subscribed_message,
        build_welcome_message, format_error, format_info, format_success, format_warning,
    },
    utils::validation::require_guild,
};

/// Custom id of the help button
pub const HELP_BUTTON_ID: &str = "help";

/// Buttons offered under the welcome message
pub fn build_quick_actions() -> Vec<CreateActionRow> {
    let summaries = WindowKind::ALL
        .into_iter()
        .map(|kind| {
            CreateButton::new(kind.custom_id())
                .label(kind.label())
                .style(ButtonStyle::Primary)
        })
        .collect();

    let help = CreateButton::new(HELP_BUTTON_ID)
        .label("❓ Help")
        .style(ButtonStyle::Secondary);

    vec![
        CreateActionRow::Buttons(summaries),
        CreateActionRow::Buttons(vec![help]),
    ]
}

/// Start the birthday bot
#[poise::command(slash_command)]
pub async fn start(ctx: Context<'_>) -> Result<(), Error> {
    let reply = CreateReply::default()
        .content(build_welcome_message(&ctx.data().reminder_time()))
        .components(build_quick_actions());
    ctx.send(reply).await?;
    Ok(())
}

/// Show help and commands
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(build_help_message(&ctx.data().reminder_time())).await?;
    Ok(())
}

/// Set this channel for daily birthday reminders
#[poise::command(slash_command, rename = "setgroup")]
pub async fn set_group(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = match require_guild(ctx.guild_id()) {
        Ok(id) => id,
        Err(_) => {
            ctx.say(format_warning(
                "This command should be used in the server channel where you want birthday reminders.",
            ))
            .await?;
            return Ok(());
        }
    };

    let channel_id = ctx.channel_id();
    let label = match channel_id.name(ctx).await {
        Ok(name) => format!("#{}", name),
        Err(_) => channel_id.to_string(),
    };

    match ctx.data().subscriptions.subscribe(channel_id, &label).await {
        Ok(false) => {
            ctx.say(format_info("This channel is already set for birthday reminders."))
                .await?;
        }
        Ok(true) => {
            ctx.say(build_subscribed_message(&ctx.data().reminder_time()))
                .await?;
            info!(
                "Channel {} ({}) in guild {} subscribed to reminders",
                channel_id, label, guild_id
            );
        }
        Err(e) => {
            error!("Failed to save subscription for channel {}: {}", channel_id, e);
            ctx.say(format_error("Failed to save this channel. Please try again."))
                .await?;
        }
    }

    Ok(())
}

/// Stop daily birthday reminders in this channel
#[poise::command(slash_command, rename = "unsetgroup")]
pub async fn unset_group(ctx: Context<'_>) -> Result<(), Error> {
    let channel_id = ctx.channel_id();

    match ctx.data().subscriptions.unsubscribe(channel_id).await {
        Ok(true) => {
            ctx.say(format_success("This channel will no longer receive birthday reminders."))
                .await?;
            info!("Channel {} unsubscribed from reminders", channel_id);
        }
        Ok(false) => {
            ctx.say(format_info("This channel was not set for birthday reminders."))
                .await?;
        }
        Err(e) => {
            error!("Failed to remove subscription for channel {}: {}", channel_id, e);
            ctx.say(format_error("Failed to update this channel. Please try again."))
                .await?;
        }
    }

    Ok(())
}

/// Check bot status
#[poise::command(slash_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let status = StatusInfo {
        uptime_secs: data.started_at.elapsed().as_secs(),
        now: data.zone.now_display(),
        zone: data.zone.label(),
        subscribed: data.subscriptions.len(),
        here: data.subscriptions.contains(ctx.channel_id()),
        records: BirthdayService::new(&data.store).count().await,
    };

    ctx.say(build_status_message(&status)).await?;
    Ok(())
}
