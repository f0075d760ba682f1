use serde::Serialize;
use tokio::sync::broadcast;

use parley_shared::CallStatus;

use crate::notifications::NotificationCategory;
use crate::overlay::OverlayAction;

/// Capacity of the client event bus.
pub const EVENT_BUS_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStatePayload {
    pub channel_name: String,
    pub status: CallStatus,
    pub is_muted: bool,
}

/// Events fanned out to whoever hosts the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// A tap target on the call overlay was pressed.
    OverlayAction(OverlayAction),
    CallStateChanged(CallStatePayload),
    NotificationPosted {
        id: i32,
        category: NotificationCategory,
    },
}

pub fn event_bus() -> broadcast::Sender<ClientEvent> {
    broadcast::channel(EVENT_BUS_CAPACITY).0
}

pub fn emit_event(events: &broadcast::Sender<ClientEvent>, event: ClientEvent) {
    // No subscribers is normal while the UI is in the background.
    if let Err(e) = events.send(event) {
        tracing::debug!(event = ?e.0, "No subscribers for client event");
    }
}
