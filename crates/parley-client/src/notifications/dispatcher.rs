use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use parley_api::ApiClient;
use parley_shared::PushPayload;
use parley_store::{Database, NotificationToggles};

use crate::events::{emit_event, ClientEvent};

use super::channels::channel_specs;
use super::planner::{plan_notification, stable_id};
use super::surface::NotificationSurface;

/// Receives push events and turns them into local notifications.
///
/// Best effort: every failure is logged and swallowed so a bad payload or a
/// flaky surface never reaches the host.
pub struct PushDispatcher<S> {
    surface: S,
    database: Arc<Mutex<Database>>,
    api: ApiClient,
    events: Option<broadcast::Sender<ClientEvent>>,
}

impl<S: NotificationSurface> PushDispatcher<S> {
    pub fn new(surface: S, database: Arc<Mutex<Database>>, api: ApiClient) -> Self {
        Self {
            surface,
            database,
            api,
            events: None,
        }
    }

    /// Announce posted notifications on the client event bus.
    pub fn with_events(mut self, events: broadcast::Sender<ClientEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Register every notification channel. Safe to call repeatedly.
    pub fn ensure_channels(&self) {
        for channel in channel_specs() {
            if let Err(e) = self.surface.create_channel(&channel) {
                warn!(channel = channel.id, error = %e, "Failed to create notification channel");
            }
        }
    }

    /// Handle one inbound push. Returns the id of the posted notification.
    pub fn on_message_received(&self, payload: &PushPayload) -> Option<i32> {
        let toggles = self.toggles()?;
        let now = chrono::Utc::now().timestamp_millis();

        let Some(notification) = plan_notification(payload, &toggles, now) else {
            debug!(kind = payload.kind().as_type(), "Push suppressed");
            return None;
        };

        if let Err(e) = self.surface.post(&notification) {
            error!(id = notification.id, error = %e, "Failed to post notification");
            return None;
        }

        if let Some(events) = &self.events {
            emit_event(
                events,
                ClientEvent::NotificationPosted {
                    id: notification.id,
                    category: notification.category,
                },
            );
        }
        Some(notification.id)
    }

    /// Forward a rotated push token to the backend. Returns whether the
    /// backend accepted it.
    pub async fn on_new_token(&self, token: &str) -> bool {
        match self.api.register_push_token(token).await {
            Ok(resp) if resp.success => {
                info!("Push token registered");
                true
            }
            Ok(resp) => {
                warn!(message = ?resp.message, "Backend rejected push token");
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to register push token");
                false
            }
        }
    }

    /// Dismiss the notification of a conversation the user just opened.
    pub fn clear_chat(&self, chat_id: &str) {
        if let Err(e) = self.surface.cancel(stable_id(chat_id)) {
            warn!(chat_id, error = %e, "Failed to cancel chat notification");
        }
    }

    fn toggles(&self) -> Option<NotificationToggles> {
        let db = match self.database.lock() {
            Ok(db) => db,
            Err(e) => {
                error!("Lock poisoned: {e}");
                return None;
            }
        };
        match db.notification_toggles() {
            Ok(toggles) => Some(toggles),
            Err(e) => {
                error!(error = %e, "Failed to read notification settings");
                None
            }
        }
    }
}
