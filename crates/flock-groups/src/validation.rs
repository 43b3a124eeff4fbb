//! Attribute validation for group creation and updates.

use crate::config::GroupsConfig;
use crate::error::GroupError;

/// Canonical form of any username used as a lookup key.
pub fn canonical_username(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Normalise and validate a group username.
///
/// Usernames are lowercased, then must consist of ASCII letters, digits,
/// `_` and `-`, start with a letter or digit, and respect the configured
/// length bounds.
pub fn normalize_username(raw: &str, config: &GroupsConfig) -> Result<String, GroupError> {
    let username = canonical_username(raw);
    let invalid = |reason: String| GroupError::InvalidUsername {
        username: raw.to_string(),
        reason,
    };

    let len = username.chars().count();
    if len < config.username_min_length || len > config.username_max_length {
        return Err(invalid(format!(
            "must be {}-{} characters long",
            config.username_min_length, config.username_max_length
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(invalid(
            "may only contain letters, digits, '_' and '-'".into(),
        ));
    }
    if !username.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err(invalid("must start with a letter or digit".into()));
    }

    Ok(username)
}

/// Trim a screen name and check the trimmed value against the
/// configured length bounds. The trimmed value is what gets stored.
pub fn normalize_screen_name(raw: &str, config: &GroupsConfig) -> Result<String, GroupError> {
    let screen_name = raw.trim();
    let len = screen_name.chars().count();
    if len < config.screen_name_min_length || len > config.screen_name_max_length {
        return Err(GroupError::InvalidScreenName(format!(
            "must be {}-{} characters long",
            config.screen_name_min_length, config.screen_name_max_length
        )));
    }
    Ok(screen_name.to_string())
}

pub fn validate_description(description: &str, config: &GroupsConfig) -> Result<(), GroupError> {
    if description.chars().count() > config.description_max_length {
        return Err(GroupError::DescriptionTooLong {
            max: config.description_max_length,
        });
    }
    Ok(())
}
