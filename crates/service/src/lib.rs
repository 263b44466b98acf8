//! Service layer for user records.
//! - `storage`: serialized CRUD over the persisted collection.
//! - `user`: validation, identity assignment and partial-update merge on top of storage.
//! - `errors`: the typed failures returned by both layers.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod user;

pub use errors::ServiceError;
pub use storage::{file_repo::FileUserRepository, memory::InMemoryUserRepository, UserRepository};
pub use user::{UserManager, UserService};
