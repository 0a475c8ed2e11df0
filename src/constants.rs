/// Default location of the birthday roster
pub const DEFAULT_BIRTHDAYS_FILE: &str = "data/birthdays.json";

/// Default location of the subscribed conversations
pub const DEFAULT_SUBSCRIPTIONS_FILE: &str = "data/subscriptions.json";

/// Daily reminder at 09:00 (sec min hour day month weekday)
pub const DEFAULT_REMINDER_CRON: &str = "0 0 9 * * *";

/// Stored in place of a missing phone number
pub const PHONE_PLACEHOLDER: &str = "N/A";

/// Number of days covered by the weekly views
pub const WEEK_LENGTH: u32 = 7;

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birthday_bot=info";

/// Discord rejects message content longer than this many characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;
