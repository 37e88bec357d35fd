//! Client, output regions and dispatcher for the userlist API.
//!
//! [`Dispatcher::run`] turns the current filter values into a request URL,
//! fetches it through a [`UserSource`] (normally [`UsersClient`]) and writes
//! the URL and the highlighted response into two [`OutputRegion`]s.

#![deny(missing_docs)]

pub mod client;
pub mod dispatcher;
pub mod models;
pub mod render;

pub use client::{UsersClient, UsersClientBuilder};
pub use dispatcher::{Dispatcher, Rendering, UserSource};
pub use models::{User, UserFilter};
pub use render::{MemoryRegion, OutputRegion, ECHO_REGION_ID, RESULT_REGION_ID};

/// Convenient result alias sharing the `userlist-core` error type.
pub type Result<T> = userlist_core::Result<T>;
