//! # parley-shared
//!
//! Data model of the Parley chat client: the records the backend returns,
//! the request bodies it accepts, push payloads and call snapshots.
//!
//! Records carry their identifier as [`EntityId`], which accepts both the
//! `id` and legacy `_id` spellings on input.

pub mod call;
pub mod chat;
pub mod constants;
pub mod error;
pub mod message;
pub mod push;
pub mod requests;
pub mod types;
pub mod user;

pub use call::{CallParticipant, CallSnapshot, CallStatus};
pub use chat::{Chat, ChatKind, LastMessage};
pub use error::ModelError;
pub use message::{DeliveryState, Message, MessageKind, MessagePage, Reaction};
pub use push::{PushKind, PushPayload};
pub use types::EntityId;
pub use user::{FriendRequest, User, UserRole, UserSummary};
