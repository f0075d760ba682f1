use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::info;

use parley_shared::{CallSnapshot, CallStatus};

use crate::error::{ClientError, Result};
use crate::events::{emit_event, CallStatePayload, ClientEvent};
use crate::overlay::{OverlayAction, OverlayLauncher, WindowSurface};

struct ActiveCall {
    snapshot: CallSnapshot,
    display_name: String,
    is_muted: bool,
    connected_at: Option<Instant>,
}

/// Owns the local view of the current call and keeps the overlay in step.
///
/// The overlay appears when the call connects, shows elapsed time on every
/// tick, and goes away when the call ends.
pub struct CallController<F> {
    call: Option<ActiveCall>,
    overlay: OverlayLauncher<F>,
    events: broadcast::Sender<ClientEvent>,
}

impl<F, W> CallController<F>
where
    F: FnMut() -> W,
    W: WindowSurface,
{
    pub fn new(overlay: OverlayLauncher<F>, events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            call: None,
            overlay,
            events,
        }
    }

    pub fn current(&self) -> Option<&CallSnapshot> {
        self.call.as_ref().map(|c| &c.snapshot)
    }

    pub fn is_muted(&self) -> bool {
        self.call.as_ref().is_some_and(|c| c.is_muted)
    }

    pub fn overlay_running(&self) -> bool {
        self.overlay.is_running()
    }

    /// Track a new call. `display_name` is what the overlay shows.
    ///
    /// Snapshots that have already ended are refused and leave the
    /// controller idle.
    pub fn begin(&mut self, snapshot: CallSnapshot, display_name: &str, now: Instant) -> Result<()> {
        if self.call.is_some() {
            return Err(ClientError::AlreadyInCall);
        }
        if snapshot.status == CallStatus::Ended {
            return Err(ClientError::CallEnded);
        }
        info!(channel = %snapshot.channel_name, status = ?snapshot.status, "Call started");

        let connected = snapshot.status == CallStatus::Connected;
        self.call = Some(ActiveCall {
            snapshot,
            display_name: display_name.to_string(),
            is_muted: false,
            connected_at: connected.then_some(now),
        });
        if connected {
            self.overlay.start(display_name, &format_duration(Duration::ZERO));
        }
        self.publish();
        Ok(())
    }

    /// Move the call forward. Backward moves are rejected.
    pub fn advance(&mut self, status: CallStatus, now: Instant) -> Result<()> {
        let call = self.call.as_mut().ok_or(ClientError::NotInCall)?;
        call.snapshot.advance(status)?;
        info!(channel = %call.snapshot.channel_name, ?status, "Call status changed");

        match status {
            CallStatus::Connected => {
                call.connected_at = Some(now);
                let name = call.display_name.clone();
                let muted = call.is_muted;
                self.overlay.start(&name, &format_duration(Duration::ZERO));
                self.overlay.set_muted(muted);
            }
            CallStatus::Ended => {
                self.overlay.stop();
            }
            _ => {}
        }

        self.publish();
        if status == CallStatus::Ended {
            self.call = None;
        }
        Ok(())
    }

    pub fn end(&mut self, now: Instant) -> Result<()> {
        self.advance(CallStatus::Ended, now)
    }

    pub fn toggle_mute(&mut self) -> Result<bool> {
        let call = self.call.as_mut().ok_or(ClientError::NotInCall)?;
        call.is_muted = !call.is_muted;
        let muted = call.is_muted;
        info!(muted, "Mute toggled");

        self.overlay.set_muted(muted);
        self.publish();
        Ok(muted)
    }

    /// Refresh the overlay clock. Returns the text shown, if connected.
    pub fn tick(&self, now: Instant) -> Option<String> {
        let connected_at = self.call.as_ref()?.connected_at?;
        let text = format_duration(now.saturating_duration_since(connected_at));
        self.overlay.update(&text);
        Some(text)
    }

    /// React to a tap on the overlay. Expanding is left to the host, which
    /// sees the same action on the event bus.
    pub fn handle_action(&mut self, action: OverlayAction, now: Instant) -> Result<()> {
        match action {
            OverlayAction::ToggleMute => self.toggle_mute().map(drop),
            OverlayAction::EndCall => self.end(now),
            OverlayAction::ExpandToApp => Ok(()),
        }
    }

    fn publish(&self) {
        let Some(call) = &self.call else {
            return;
        };
        emit_event(
            &self.events,
            ClientEvent::CallStateChanged(CallStatePayload {
                channel_name: call.snapshot.channel_name.clone(),
                status: call.snapshot.status,
                is_muted: call.is_muted,
            }),
        );
    }
}

/// `mm:ss` under an hour, `h:mm:ss` beyond.
pub fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_bus;
    use crate::overlay::surface::testing::{Op, RecordingSurface};
    use parley_shared::ModelError;
    use tokio::runtime::Handle;

    fn controller() -> (
        CallController<impl FnMut() -> RecordingSurface>,
        RecordingSurface,
        broadcast::Receiver<ClientEvent>,
    ) {
        let surface = RecordingSurface::default();
        let factory_surface = surface.clone();
        let bus = event_bus();
        let rx = bus.subscribe();
        let launcher =
            OverlayLauncher::new(move || factory_surface.clone(), bus.clone(), Handle::current());
        (CallController::new(launcher, bus), surface, rx)
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(Duration::ZERO), "00:00");
        assert_eq!(format_duration(Duration::from_secs(75)), "01:15");
        assert_eq!(format_duration(Duration::from_secs(3599)), "59:59");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1:00:00");
        assert_eq!(format_duration(Duration::from_millis(7_384_900)), "2:03:04");
    }

    #[tokio::test]
    async fn overlay_follows_call_lifecycle() {
        let (mut calls, surface, _rx) = controller();
        let t0 = Instant::now();

        calls.begin(CallSnapshot::new("room-1"), "Alice", t0).unwrap();
        calls.advance(CallStatus::Ringing, t0).unwrap();
        assert!(!calls.overlay_running());
        assert_eq!(calls.tick(t0), None);

        calls.advance(CallStatus::Connected, t0).unwrap();
        assert!(calls.overlay_running());
        assert_eq!(calls.tick(t0 + Duration::from_secs(61)).as_deref(), Some("01:01"));

        calls.end(t0 + Duration::from_secs(62)).unwrap();
        assert!(calls.current().is_none());
        assert!(!calls.overlay_running());

        // Let the overlay task drain its queue.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        let ops = surface.ops();
        assert_eq!(ops.first(), Some(&Op::Attach("Alice".into())));
        assert!(ops.contains(&Op::Duration(1, "01:01".into())));
        assert_eq!(ops.last(), Some(&Op::Detach(1)));
    }

    #[tokio::test]
    async fn status_never_moves_backward() {
        let (mut calls, _surface, _rx) = controller();
        let t0 = Instant::now();
        calls.begin(CallSnapshot::new("room-1"), "Alice", t0).unwrap();
        calls.advance(CallStatus::Connecting, t0).unwrap();

        let err = calls.advance(CallStatus::Ringing, t0).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Model(ModelError::InvalidCallTransition {
                from: CallStatus::Connecting,
                to: CallStatus::Ringing,
            })
        ));
        assert_eq!(calls.current().unwrap().status, CallStatus::Connecting);
    }

    #[tokio::test]
    async fn one_call_at_a_time() {
        let (mut calls, _surface, _rx) = controller();
        let t0 = Instant::now();
        calls.begin(CallSnapshot::new("room-1"), "Alice", t0).unwrap();
        assert!(matches!(
            calls.begin(CallSnapshot::new("room-2"), "Bob", t0),
            Err(ClientError::AlreadyInCall)
        ));
    }

    #[tokio::test]
    async fn mute_requires_a_call() {
        let (mut calls, _surface, mut rx) = controller();
        assert!(matches!(calls.toggle_mute(), Err(ClientError::NotInCall)));

        let t0 = Instant::now();
        calls.begin(CallSnapshot::new("room-1"), "Alice", t0).unwrap();
        let _ = rx.try_recv();

        assert!(calls.toggle_mute().unwrap());
        assert!(calls.is_muted());
        match rx.try_recv().unwrap() {
            ClientEvent::CallStateChanged(payload) => assert!(payload.is_muted),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn overlay_actions_drive_the_call() {
        let (mut calls, _surface, _rx) = controller();
        let t0 = Instant::now();
        let mut snapshot = CallSnapshot::new("room-1");
        snapshot.status = CallStatus::Connected;
        calls.begin(snapshot, "Alice", t0).unwrap();
        assert!(calls.overlay_running());

        calls.handle_action(OverlayAction::ToggleMute, t0).unwrap();
        assert!(calls.is_muted());
        calls.handle_action(OverlayAction::ExpandToApp, t0).unwrap();
        assert!(calls.current().is_some());
        calls.handle_action(OverlayAction::EndCall, t0).unwrap();
        assert!(calls.current().is_none());
    }

    fn snapshot_in(status: CallStatus) -> CallSnapshot {
        let mut snapshot = CallSnapshot::new("room-1");
        snapshot.status = status;
        snapshot
    }

    #[tokio::test]
    async fn ended_snapshot_is_refused_and_controller_stays_usable() {
        let (mut calls, surface, _rx) = controller();
        let t0 = Instant::now();

        assert!(matches!(
            calls.begin(snapshot_in(CallStatus::Ended), "Alice", t0),
            Err(ClientError::CallEnded)
        ));
        assert!(calls.current().is_none());
        assert!(!calls.overlay_running());
        assert!(matches!(calls.end(t0), Err(ClientError::NotInCall)));

        calls.begin(CallSnapshot::new("room-2"), "Bob", t0).unwrap();
        assert_eq!(calls.current().unwrap().channel_name, "room-2");
        calls.end(t0).unwrap();
        assert!(calls.current().is_none());

        tokio::task::yield_now().await;
        assert_eq!(surface.count(|op| matches!(op, Op::Attach(_))), 0);
    }

    #[tokio::test]
    async fn begin_respects_entry_status() {
        for (status, overlay_expected) in [
            (CallStatus::Idle, false),
            (CallStatus::Ringing, false),
            (CallStatus::Connecting, false),
            (CallStatus::Connected, true),
        ] {
            let (mut calls, _surface, _rx) = controller();
            let t0 = Instant::now();

            calls.begin(snapshot_in(status), "Alice", t0).unwrap();
            assert_eq!(calls.current().unwrap().status, status);
            assert_eq!(calls.overlay_running(), overlay_expected, "{status:?}");
            assert_eq!(calls.tick(t0).is_some(), overlay_expected, "{status:?}");

            calls.end(t0).unwrap();
            assert!(calls.current().is_none(), "{status:?}");
            assert!(!calls.overlay_running(), "{status:?}");
        }
    }
}
