//! Backend endpoints, grouped by resource.
//!
//! Each sub-module extends [`ApiClient`](crate::ApiClient) with one async
//! method per endpoint.

pub mod app;
pub mod auth;
pub mod calls;
pub mod chats;
pub mod friends;
pub mod messages;
pub mod uploads;
pub mod users;
