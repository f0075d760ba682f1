//! Flat settings, one row per key.
//!
//! Every key carries its own default, returned whenever the key is absent
//! or holds something unreadable.

use tracing::{info, warn};

use crate::database::Database;
use crate::error::Result;
use crate::kv::Table;
use crate::models::{AppSettings, NotificationToggles};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolKey {
    pub name: &'static str,
    pub default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringKey {
    pub name: &'static str,
    pub default: &'static str,
}

pub mod keys {
    use super::{BoolKey, StringKey};

    pub const NOTIFICATIONS_ENABLED: BoolKey = BoolKey { name: "notifications_enabled", default: true };
    pub const MESSAGE_NOTIFICATIONS: BoolKey = BoolKey { name: "message_notifications", default: true };
    pub const FRIEND_REQUEST_NOTIFICATIONS: BoolKey = BoolKey { name: "friend_request_notifications", default: true };
    pub const FRIEND_ACCEPTED_NOTIFICATIONS: BoolKey = BoolKey { name: "friend_accepted_notifications", default: true };
    pub const CHAT_INVITE_NOTIFICATIONS: BoolKey = BoolKey { name: "chat_invite_notifications", default: true };
    pub const NOTIFICATION_SOUND: BoolKey = BoolKey { name: "notification_sound", default: true };
    pub const NOTIFICATION_VIBRATION: BoolKey = BoolKey { name: "notification_vibration", default: true };
    pub const SHOW_ONLINE_STATUS: BoolKey = BoolKey { name: "show_online_status", default: true };
    pub const READ_RECEIPTS: BoolKey = BoolKey { name: "read_receipts", default: true };

    pub const THEME_MODE: StringKey = StringKey { name: "theme_mode", default: "system" };
    /// Empty means no custom theme is selected.
    pub const ACTIVE_THEME: StringKey = StringKey { name: "active_theme", default: "" };
    pub const LANGUAGE: StringKey = StringKey { name: "language", default: "en" };
}

fn parse_bool(key: BoolKey, raw: Option<String>) -> bool {
    match raw.as_deref() {
        None => key.default,
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            warn!(key = key.name, value = other, "Unreadable boolean setting, using default");
            key.default
        }
    }
}

impl Database {
    pub fn get_bool(&self, key: BoolKey) -> Result<bool> {
        Ok(parse_bool(key, self.kv_get(Table::Settings, key.name)?))
    }

    pub fn set_bool(&self, key: BoolKey, value: bool) -> Result<()> {
        self.kv_put(Table::Settings, key.name, if value { "true" } else { "false" })
    }

    /// Flip a boolean setting in one transaction and return the new value.
    pub fn toggle_bool(&self, key: BoolKey) -> Result<bool> {
        self.kv_edit(Table::Settings, key.name, |raw| {
            let next = !parse_bool(key, raw);
            Ok((Some(next.to_string()), next))
        })
    }

    pub fn get_string(&self, key: StringKey) -> Result<String> {
        Ok(self
            .kv_get(Table::Settings, key.name)?
            .unwrap_or_else(|| key.default.to_string()))
    }

    pub fn set_string(&self, key: StringKey, value: &str) -> Result<()> {
        self.kv_put(Table::Settings, key.name, value)
    }

    /// Drop a stored value so its default applies again.
    pub fn reset_setting(&self, name: &str) -> Result<bool> {
        self.kv_remove(Table::Settings, name)
    }

    pub fn settings(&self) -> Result<AppSettings> {
        let active_theme = self.get_string(keys::ACTIVE_THEME)?;
        Ok(AppSettings {
            notifications_enabled: self.get_bool(keys::NOTIFICATIONS_ENABLED)?,
            message_notifications: self.get_bool(keys::MESSAGE_NOTIFICATIONS)?,
            friend_request_notifications: self.get_bool(keys::FRIEND_REQUEST_NOTIFICATIONS)?,
            friend_accepted_notifications: self.get_bool(keys::FRIEND_ACCEPTED_NOTIFICATIONS)?,
            chat_invite_notifications: self.get_bool(keys::CHAT_INVITE_NOTIFICATIONS)?,
            notification_sound: self.get_bool(keys::NOTIFICATION_SOUND)?,
            notification_vibration: self.get_bool(keys::NOTIFICATION_VIBRATION)?,
            show_online_status: self.get_bool(keys::SHOW_ONLINE_STATUS)?,
            read_receipts: self.get_bool(keys::READ_RECEIPTS)?,
            theme_mode: self.get_string(keys::THEME_MODE)?,
            active_theme: (!active_theme.is_empty()).then_some(active_theme),
            language: self.get_string(keys::LANGUAGE)?,
        })
    }

    /// Write every field of `settings` in one transaction.
    pub fn update_settings(&self, settings: &AppSettings) -> Result<()> {
        let tx = self.conn().unchecked_transaction()?;
        for (key, value) in [
            (keys::NOTIFICATIONS_ENABLED, settings.notifications_enabled),
            (keys::MESSAGE_NOTIFICATIONS, settings.message_notifications),
            (keys::FRIEND_REQUEST_NOTIFICATIONS, settings.friend_request_notifications),
            (keys::FRIEND_ACCEPTED_NOTIFICATIONS, settings.friend_accepted_notifications),
            (keys::CHAT_INVITE_NOTIFICATIONS, settings.chat_invite_notifications),
            (keys::NOTIFICATION_SOUND, settings.notification_sound),
            (keys::NOTIFICATION_VIBRATION, settings.notification_vibration),
            (keys::SHOW_ONLINE_STATUS, settings.show_online_status),
            (keys::READ_RECEIPTS, settings.read_receipts),
        ] {
            self.set_bool(key, value)?;
        }
        self.set_string(keys::THEME_MODE, &settings.theme_mode)?;
        self.set_string(keys::ACTIVE_THEME, settings.active_theme.as_deref().unwrap_or(""))?;
        self.set_string(keys::LANGUAGE, &settings.language)?;
        tx.commit()?;

        info!("Settings updated");
        Ok(())
    }

    pub fn notification_toggles(&self) -> Result<NotificationToggles> {
        Ok(NotificationToggles {
            enabled: self.get_bool(keys::NOTIFICATIONS_ENABLED)?,
            messages: self.get_bool(keys::MESSAGE_NOTIFICATIONS)?,
            friend_requests: self.get_bool(keys::FRIEND_REQUEST_NOTIFICATIONS)?,
            friend_accepted: self.get_bool(keys::FRIEND_ACCEPTED_NOTIFICATIONS)?,
            chat_invites: self.get_bool(keys::CHAT_INVITE_NOTIFICATIONS)?,
            sound: self.get_bool(keys::NOTIFICATION_SOUND)?,
            vibration: self.get_bool(keys::NOTIFICATION_VIBRATION)?,
        })
    }
}
