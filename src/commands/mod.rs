// Command modules
mod birthday;
mod group;

// Re-export all commands
pub use birthday::{add_birthday, next_week, previous_month, send_reminders, this_week};
pub use group::{HELP_BUTTON_ID, help, set_group, start, status, unset_group};
