use thiserror::Error;

use super::channels::ChannelSpec;
use super::planner::Notification;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("notification permission not granted")]
    PermissionDenied,

    #[error("notification surface unavailable: {0}")]
    Unavailable(String),
}

/// Adapter to the host platform's notification tray.
pub trait NotificationSurface: Send + Sync {
    fn create_channel(&self, channel: &ChannelSpec) -> Result<(), SurfaceError>;
    fn post(&self, notification: &Notification) -> Result<(), SurfaceError>;
    fn cancel(&self, id: i32) -> Result<(), SurfaceError>;
}

/// Headless surface that writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSurface;

impl NotificationSurface for LogSurface {
    fn create_channel(&self, channel: &ChannelSpec) -> Result<(), SurfaceError> {
        tracing::debug!(id = channel.id, name = channel.name, "Notification channel registered");
        Ok(())
    }

    fn post(&self, n: &Notification) -> Result<(), SurfaceError> {
        tracing::info!(
            id = n.id,
            channel = n.channel_id,
            group = n.group_key,
            link = %n.deep_link,
            silent = n.silent,
            "[{}] {}",
            n.title,
            n.body
        );
        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<(), SurfaceError> {
        tracing::info!(id, "Notification cancelled");
        Ok(())
    }
}
