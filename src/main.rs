mod commands;
mod constants;
mod handlers;
mod import;
mod models;
mod notifier;
mod schedule;
mod services;
mod storage;
mod utils;

use poise::serenity_prelude as serenity;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    commands::{
        add_birthday, help, next_week, previous_month, send_reminders, set_group, start, status,
        this_week, unset_group,
    },
    constants::{DEFAULT_BIRTHDAYS_FILE, DEFAULT_REMINDER_CRON, DEFAULT_SUBSCRIPTIONS_FILE, LOG_DIRECTIVE},
    handlers::handle_interaction,
    models::{Data, Error},
    notifier::{DiscordNotifier, Notifier},
    schedule::{Schedule, run_daily_reminder, start_schedule_manager},
    services::{BirthdayService, WindowKind},
    storage::{RecordStore, SubscriptionStore},
    utils::messages::{build_apology, build_command_failure},
    utils::timezone::ReferenceZone,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    let mode = match parse_mode(std::env::args().skip(1)) {
        Ok(mode) => mode,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    // Load configuration from environment
    let config = match load_configuration(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match mode {
        Mode::Run => run_bot(config).await,
        Mode::Import(csv_path) => import_csv(&config, &csv_path).await,
        Mode::Check => check_tomorrow(&config).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// What the binary was asked to do
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    /// Run the Discord bot (default)
    Run,
    /// Replace the birthday file with the contents of a CSV export
    Import(PathBuf),
    /// Print tomorrow's reminder without sending it
    Check,
}

fn parse_mode(mut args: impl Iterator<Item = String>) -> Result<Mode, String> {
    match args.next().as_deref() {
        None | Some("run") => Ok(Mode::Run),
        Some("check") => Ok(Mode::Check),
        Some("import") => args
            .next()
            .map(|path| Mode::Import(PathBuf::from(path)))
            .ok_or_else(|| "Usage: birthday_bot import <file.csv>".to_string()),
        Some(other) => Err(format!(
            "Unknown command '{}'. Usage: birthday_bot [run | check | import <file.csv>]",
            other
        )),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
enum ConfigError {
    #[error("{0} environment variable not set. {1}")]
    Missing(&'static str, &'static str),
    #[error("{0}")]
    InvalidTimezone(#[from] utils::timezone::TimezoneError),
    #[error("REMINDER_CRON: {0}")]
    InvalidSchedule(#[from] schedule::ScheduleError),
}

/// Configuration loaded from environment variables
struct Config {
    discord_token: Option<String>,
    birthdays_file: PathBuf,
    subscriptions_file: PathBuf,
    reminder_schedule: Schedule,
    zone: ReferenceZone,
    dev_guild_id: Option<u64>,
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Load configuration through a variable lookup (the process environment in production)
fn load_configuration(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let reminder_cron = non_empty("REMINDER_CRON").unwrap_or_else(|| DEFAULT_REMINDER_CRON.to_string());
    let reminder_schedule = Schedule::parse("daily birthday reminder", reminder_cron.trim())?;

    let zone = ReferenceZone::from_name(non_empty("BIRTHDAY_TIMEZONE").as_deref())?;

    // Optional: development guild ID for faster command registration
    let dev_guild_id = non_empty("DEV_GUILD_ID").and_then(|id| id.trim().parse::<u64>().ok());

    Ok(Config {
        discord_token: non_empty("DISCORD_TOKEN"),
        birthdays_file: non_empty("BIRTHDAYS_FILE")
            .unwrap_or_else(|| DEFAULT_BIRTHDAYS_FILE.to_string())
            .into(),
        subscriptions_file: non_empty("SUBSCRIPTIONS_FILE")
            .unwrap_or_else(|| DEFAULT_SUBSCRIPTIONS_FILE.to_string())
            .into(),
        reminder_schedule,
        zone,
        dev_guild_id,
    })
}

/// Convert a CSV export and replace the birthday file with the result
async fn import_csv(config: &Config, csv_path: &Path) -> Result<(), Error> {
    let text = tokio::fs::read_to_string(csv_path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", csv_path.display(), e))?;

    let report = import::convert_csv(&text)?;
    let store = RecordStore::new(&config.birthdays_file);
    store.save(&report.records).await?;

    println!("=== Converted Birthday Data ===");
    for record in &report.records {
        println!("{} - {} - {}", record.name, record.birthday, record.phone);
    }
    println!(
        "\nTotal: {} birthdays converted into {} ({} rows skipped)",
        report.records.len(),
        store.path().display(),
        report.skipped
    );
    Ok(())
}

/// Print tomorrow's birthdays and the reminder that would be sent
async fn check_tomorrow(config: &Config) -> Result<(), Error> {
    let store = RecordStore::new(&config.birthdays_file);
    let records = store.try_load().await?;
    let today = config.zone.today();
    let service = BirthdayService::new(&store);
    let tomorrows = service.tomorrows_birthdays(today).await;

    println!("{} birthday(s) on file, today is {} ({})", records.len(), today, config.zone.label());
    println!("{} birthday(s) tomorrow", tomorrows.len());

    match service.reminder(today).await {
        Some(message) => println!("\nGenerated message:\n{}", message),
        None => println!("No birthdays tomorrow - no reminder would be sent"),
    }
    Ok(())
}

/// Reply to failed commands without exposing internal detail
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command = ctx.command().name.clone();
            error!("Error handling /{}: {}", command, error);

            let reply = WindowKind::from_custom_id(&command)
                .map(|kind| build_apology(kind.subject()))
                .unwrap_or_else(build_command_failure);
            if let Err(e) = ctx.say(reply).await {
                warn!("Failed to send error reply for /{}: {}", command, e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Create and start the Discord bot
async fn run_bot(config: Config) -> Result<(), Error> {
    let token = config.discord_token.clone().ok_or(ConfigError::Missing(
        "DISCORD_TOKEN",
        "Set it with: export DISCORD_TOKEN=your_bot_token",
    ))?;

    let subscriptions = SubscriptionStore::open(&config.subscriptions_file).await;
    let data = Data::new(
        RecordStore::new(&config.birthdays_file),
        subscriptions,
        config.zone,
    )
    .with_reminder_cron(&config.reminder_schedule.cron_expression);

    info!(
        "Reading birthdays from {} ({} on file)",
        data.store.path().display(),
        BirthdayService::new(&data.store).count().await
    );

    let dev_guild_id = config.dev_guild_id;
    if dev_guild_id.is_some() {
        info!("Development mode: Commands will be registered to guild only");
    }

    let reminder_schedule = config.reminder_schedule;
    let zone = config.zone;

    // Create framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                start(),
                help(),
                set_group(),
                unset_group(),
                this_week(),
                next_week(),
                previous_month(),
                status(),
                add_birthday(),
                send_reminders(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    if let serenity::FullEvent::InteractionCreate {
                        interaction: serenity::Interaction::Component(component),
                    } = event
                    {
                        handle_interaction(ctx, component.clone(), data).await;
                    }
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let notifier: Arc<dyn Notifier> = Arc::new(DiscordNotifier::new(ctx.http.clone()));
            let data_for_schedule = data.clone();

            // Start the daily reminder schedule
            start_schedule_manager(reminder_schedule, zone, move || {
                let notifier = Arc::clone(&notifier);
                let data = data_for_schedule.clone();
                async move {
                    let report = run_daily_reminder(&data, notifier.as_ref()).await;
                    info!(
                        "Daily reminder finished: {} delivered, {} failed, {} removed",
                        report.delivered,
                        report.failed,
                        report.removed.len()
                    );
                }
            });
            info!("Schedule manager task started");

            Box::pin(async move {
                // Register commands based on dev_guild_id
                if let Some(guild_id) = dev_guild_id {
                    let guild = serenity::GuildId::new(guild_id);
                    info!("Registering commands in development guild: {}", guild_id);
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild)
                        .await?;
                    info!(
                        "Commands registered in guild {} (instant updates)",
                        guild_id
                    );
                } else {
                    info!("Registering commands globally (may take up to 1 hour)");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Commands registered globally");
                }

                info!("Bot is ready!");

                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    // Start the bot
    info!("Starting bot...");
    client.start().await?;

    Ok(())
}
