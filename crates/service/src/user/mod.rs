//! User module: validation and update-merge rules over a [`UserRepository`].
//!
//! [`UserRepository`]: crate::storage::UserRepository

pub mod service;

pub use service::{UserManager, UserService};
