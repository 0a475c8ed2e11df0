use poise::serenity_prelude::GuildId;

use super::datetime::{format_month_day, is_valid_date};
use super::string_utils::is_empty_or_whitespace;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("This command must be used in a server")]
    NotInGuild,
    #[error("Name must not be empty")]
    EmptyName,
    #[error("'{0}' is not a valid birthday")]
    InvalidBirthday(String),
}

/// Extract guild ID from context, returning error if not in a guild
pub fn require_guild(guild_id: Option<GuildId>) -> Result<GuildId, ValidationError> {
    guild_id.ok_or(ValidationError::NotInGuild)
}

/// Validate a display name
pub fn require_name(name: &str) -> Result<&str, ValidationError> {
    if is_empty_or_whitespace(name) {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.trim())
}

/// Normalize user input like "7-2", "07/02" or "07-02" to the stored `MM-DD` form
pub fn normalize_birthday(input: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidBirthday(input.trim().to_string());

    let (month, day) = input
        .trim()
        .split_once(['-', '/'])
        .ok_or_else(invalid)?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let day: u32 = day.trim().parse().map_err(|_| invalid())?;

    if !is_valid_date(month, day) {
        return Err(invalid());
    }
    Ok(format_month_day(month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_guild() {
        assert!(require_guild(None).is_err());
        assert!(require_guild(Some(GuildId::new(123))).is_ok());
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("  Ada ").unwrap(), "Ada");
        assert!(matches!(require_name("   "), Err(ValidationError::EmptyName)));
    }

    #[test]
    fn test_normalize_birthday() {
        assert_eq!(normalize_birthday("07-02").unwrap(), "07-02");
        assert_eq!(normalize_birthday("7-2").unwrap(), "07-02");
        assert_eq!(normalize_birthday(" 12/25 ").unwrap(), "12-25");
        assert_eq!(normalize_birthday("2-29").unwrap(), "02-29");

        assert!(normalize_birthday("02-30").is_err());
        assert!(normalize_birthday("13-01").is_err());
        assert!(normalize_birthday("July 2").is_err());
        assert!(normalize_birthday("").is_err());
    }
}
