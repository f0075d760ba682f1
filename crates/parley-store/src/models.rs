//! Records persisted in the local store.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be stored as
//! JSON and handed to the UI layer unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Snapshot of every flat setting, each resolved to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub notifications_enabled: bool,
    pub message_notifications: bool,
    pub friend_request_notifications: bool,
    pub friend_accepted_notifications: bool,
    pub chat_invite_notifications: bool,
    pub notification_sound: bool,
    pub notification_vibration: bool,
    pub show_online_status: bool,
    pub read_receipts: bool,
    /// `system`, `light` or `dark`.
    pub theme_mode: String,
    /// Name of the selected custom theme, if any.
    pub active_theme: Option<String>,
    pub language: String,
}

/// The toggles the push dispatcher consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationToggles {
    pub enabled: bool,
    pub messages: bool,
    pub friend_requests: bool,
    pub friend_accepted: bool,
    pub chat_invites: bool,
    pub sound: bool,
    pub vibration: bool,
}

impl Default for NotificationToggles {
    fn default() -> Self {
        Self {
            enabled: true,
            messages: true,
            friend_requests: true,
            friend_accepted: true,
            chat_invites: true,
            sound: true,
            vibration: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Custom theme
// ---------------------------------------------------------------------------

/// A user-defined color theme. Names are unique within the stored list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTheme {
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub surface_color: String,
    pub text_color: String,
    pub accent_color: String,
    #[serde(default)]
    pub is_dark: bool,
}

impl CustomTheme {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidTheme("name is empty".into()));
        }
        for (field, value) in [
            ("primaryColor", &self.primary_color),
            ("secondaryColor", &self.secondary_color),
            ("backgroundColor", &self.background_color),
            ("surfaceColor", &self.surface_color),
            ("textColor", &self.text_color),
            ("accentColor", &self.accent_color),
        ] {
            parse_color(value)
                .map_err(|e| StoreError::InvalidTheme(format!("{field}: {e}")))?;
        }
        Ok(())
    }
}

/// Parse `#RRGGBB` or `#AARRGGBB` into an ARGB word. Six-digit colors are
/// opaque.
pub fn parse_color(value: &str) -> std::result::Result<u32, String> {
    let digits = value
        .strip_prefix('#')
        .ok_or_else(|| format!("{value:?} does not start with '#'"))?;
    if digits.len() != 6 && digits.len() != 8 {
        return Err(format!("{value:?} must have 6 or 8 hex digits"));
    }
    let bytes = hex::decode(digits).map_err(|e| format!("{value:?}: {e}"))?;
    let argb = bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
    Ok(if bytes.len() == 3 { 0xFF00_0000 | argb } else { argb })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse() {
        assert_eq!(parse_color("#1E88E5"), Ok(0xFF1E_88E5));
        assert_eq!(parse_color("#801E88E5"), Ok(0x801E_88E5));
        assert!(parse_color("1E88E5").is_err());
        assert!(parse_color("#1E88E").is_err());
        assert!(parse_color("#GGGGGG").is_err());
    }
}
