/// Pure functions for formatting command replies (Discord-agnostic)

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Format a warning message with emoji
pub fn format_warning(message: &str) -> String {
    format!("⚠️ {}", message)
}

/// Format an info message with emoji
pub fn format_info(message: &str) -> String {
    format!("ℹ️ {}", message)
}

/// Generic apology shown when a command cannot complete (never exposes internals)
pub fn build_apology(what: &str) -> String {
    format_error(&format!(
        "Sorry, I couldn't retrieve {}. Please try again.",
        what
    ))
}

/// Generic failure reply for commands without a more specific apology
pub fn build_command_failure() -> String {
    format_error("Sorry, something went wrong. Please try again.")
}

/// Build an error message for invalid input
pub fn build_invalid_input_error(field_name: &str, expected: &str) -> String {
    format_error(&format!(
        "Invalid {}! Please enter {}.",
        field_name, expected
    ))
}

/// List of commands shown by /start and /help
fn build_command_list() -> String {
    "• `/setgroup` - Set this channel for birthday reminders\n\
     • `/unsetgroup` - Stop reminders in this channel\n\
     • `/thisweek` - Show this week's birthdays\n\
     • `/nextweek` - Show next week's birthdays\n\
     • `/prevmonth` - Show previous month's birthdays\n\
     • `/status` - Check bot status\n\
     • `/help` - Show this help message"
        .to_string()
}

/// Welcome message for /start
pub fn build_welcome_message(reminder_time: &str) -> String {
    format!(
        "🎂 **Welcome to Birthday Reminder Bot!**\n\n\
         I'll help you keep track of birthdays in your server.\n\n\
         **Available Commands:**\n{}\n\n\
         **Setup:**\n\
         1. Pick the channel that should get reminders\n\
         2. Send `/setgroup` there\n\
         3. I'll send daily reminders ({})\n\n\
         Let's get started! 🚀",
        build_command_list(),
        reminder_time
    )
}

/// Help message for /help
pub fn build_help_message(reminder_time: &str) -> String {
    format!(
        "🤖 **Birthday Bot Help**\n\n\
         **Commands:**\n{}\n\n\
         **Features:**\n\
         ✅ Automatic daily reminders ({})\n\
         ✅ Weekly and monthly summaries\n\n\
         **Need help?** Contact the bot administrator.",
        build_command_list(),
        reminder_time
    )
}

/// Confirmation sent after /setgroup
pub fn build_subscribed_message(reminder_time: &str) -> String {
    format!(
        "{}\n\n\
         This channel has been set for birthday reminders.\n\n\
         **What happens next:**\n\
         • I'll check for birthdays daily ({})\n\
         • Birthday reminders will be sent here\n\n\
         **Try it now:** `/thisweek`, `/nextweek`, `/prevmonth`",
        format_success("**Channel Set Successfully!**"),
        reminder_time
    )
}

/// Values shown by /status
#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub uptime_secs: u64,
    pub now: String,
    pub zone: String,
    pub subscribed: usize,
    /// Whether the channel asking is one of them
    pub here: bool,
    pub records: usize,
}

/// Status message for /status
pub fn build_status_message(status: &StatusInfo) -> String {
    format!(
        "💚 **Bot Status**\n\n\
         🤖 **Service:** Online and running\n\
         ⏰ **Uptime:** {} seconds\n\
         📅 **Time:** {} ({})\n\
         👥 **Subscribed Channels:** {}{}\n\
         🎂 **Birthdays on file:** {}",
        status.uptime_secs,
        status.now,
        status.zone,
        status.subscribed,
        if status.here { " (including this one)" } else { "" },
        status.records
    )
}

/// Truncate a long message with ellipsis
pub fn truncate_message(message: &str, max_length: usize) -> String {
    if message.chars().count() <= max_length {
        message.to_string()
    } else if max_length < 3 {
        message.chars().take(max_length).collect()
    } else {
        let truncated: String = message.chars().take(max_length - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        assert_eq!(format_error("Something failed"), "❌ Something failed");
    }

    #[test]
    fn test_format_success() {
        assert_eq!(format_success("It worked"), "✅ It worked");
    }

    #[test]
    fn test_format_warning() {
        assert_eq!(format_warning("Be careful"), "⚠️ Be careful");
    }

    #[test]
    fn test_format_info() {
        assert_eq!(format_info("Good to know"), "ℹ️ Good to know");
    }

    #[test]
    fn test_build_apology() {
        assert_eq!(
            build_apology("this week's birthdays"),
            "❌ Sorry, I couldn't retrieve this week's birthdays. Please try again."
        );
    }

    #[test]
    fn test_build_command_failure_hides_details() {
        assert_eq!(
            build_command_failure(),
            "❌ Sorry, something went wrong. Please try again."
        );
    }

    #[test]
    fn test_build_invalid_input_error() {
        let result = build_invalid_input_error("birthday", "a date like 07-02");
        assert!(result.contains("birthday"));
        assert!(result.contains("07-02"));
    }

    #[test]
    fn test_help_mentions_every_command() {
        let help = build_help_message("at 09:00");
        for command in ["/setgroup", "/unsetgroup", "/thisweek", "/nextweek", "/prevmonth", "/status"] {
            assert!(help.contains(command), "missing {}", command);
        }
        assert!(help.contains("at 09:00"));
    }

    #[test]
    fn test_build_status_message() {
        let status = StatusInfo {
            uptime_secs: 42,
            now: "2024-03-15 09:00:00".to_string(),
            zone: "Europe/Paris".to_string(),
            subscribed: 2,
            here: true,
            records: 31,
        };
        let message = build_status_message(&status);
        assert!(message.contains("42 seconds"));
        assert!(message.contains("Europe/Paris"));
        assert!(message.contains("**Subscribed Channels:** 2 (including this one)"));
        assert!(message.contains("**Birthdays on file:** 31"));
    }

    #[test]
    fn test_truncate_message_short() {
        assert_eq!(truncate_message("Hello", 10), "Hello");
    }

    #[test]
    fn test_truncate_message_long() {
        assert_eq!(
            truncate_message("This is a very long message", 10),
            "This is..."
        );
    }

    #[test]
    fn test_truncate_message_counts_chars_not_bytes() {
        assert_eq!(truncate_message("🎂🎂🎂", 3), "🎂🎂🎂");
    }

    #[test]
    fn test_truncate_message_very_short_limit() {
        assert_eq!(truncate_message("Hello", 2), "He");
        assert_eq!(truncate_message("Hello", 0), "");
    }
}
