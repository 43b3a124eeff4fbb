//! Group administration configuration.

/// Limits applied to group attributes on creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupsConfig {
    /// Minimum username length in characters (default: 3).
    pub username_min_length: usize,
    /// Maximum username length in characters (default: 35).
    pub username_max_length: usize,
    /// Minimum screen name length in characters (default: 3).
    pub screen_name_min_length: usize,
    /// Maximum screen name length in characters (default: 35).
    pub screen_name_max_length: usize,
    /// Maximum description length in characters (default: 1500).
    pub description_max_length: usize,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            username_min_length: 3,
            username_max_length: 35,
            screen_name_min_length: 3,
            screen_name_max_length: 35,
            description_max_length: 1500,
        }
    }
}
