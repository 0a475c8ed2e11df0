use poise::serenity_prelude::{
    self as serenity, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use tracing::{error, info};

use crate::{
    commands::HELP_BUTTON_ID,
    constants::MAX_MESSAGE_LENGTH,
    models::{Data, Error},
    services::{BirthdayService, WindowKind},
    utils::messages::{build_help_message, truncate_message},
};

/// Handle component interactions (button clicks)
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: serenity::ComponentInteraction,
    data: &Data,
) {
    let custom_id = interaction.data.custom_id.as_str();

    let result = if let Some(kind) = WindowKind::from_custom_id(custom_id) {
        handle_summary_button(ctx, &interaction, data, kind).await
    } else if custom_id == HELP_BUTTON_ID {
        respond(ctx, &interaction, build_help_message(&data.reminder_time())).await
    } else {
        return;
    };

    if let Err(e) = result {
        error!("Failed to handle '{}' button: {}", custom_id, e);
    }
}

/// Answer a summary button with the same text the slash command sends
async fn handle_summary_button(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
    kind: WindowKind,
) -> Result<(), Error> {
    let message = BirthdayService::new(&data.store)
        .summary(kind, data.today())
        .await;

    respond(ctx, interaction, message).await?;
    info!(
        "Sent {} to channel {} via button",
        kind.subject(),
        interaction.channel_id
    );
    Ok(())
}

async fn respond(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    content: String,
) -> Result<(), Error> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new().content(truncate_message(&content, MAX_MESSAGE_LENGTH)),
    );
    interaction.create_response(ctx, response).await?;
    Ok(())
}
