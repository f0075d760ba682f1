//! Push notification dispatch.
//!
//! [`plan_notification`] decides what (if anything) to show for a payload;
//! [`PushDispatcher`] applies the user's stored toggles and hands the result
//! to a platform [`NotificationSurface`].

pub mod channels;
pub mod dispatcher;
pub mod planner;
pub mod surface;

pub use channels::{channel_specs, ChannelSpec, Importance, NotificationCategory, Presentation};
pub use dispatcher::PushDispatcher;
pub use planner::{plan_notification, stable_id, time_id, Notification};
pub use surface::{LogSurface, NotificationSurface, SurfaceError};
