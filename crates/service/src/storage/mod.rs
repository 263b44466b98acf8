//! Storage abstractions for the user collection
//!
//! Every implementation serializes its five operations behind one lock per
//! instance, so a read-modify-write cycle never interleaves with another.

pub mod file_repo;
pub mod memory;

use async_trait::async_trait;
use models::User;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Repository abstraction for user persistence.
///
/// The repository trusts its caller: records are stored as given, without
/// re-validating names or emails.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Append a record to the collection.
    async fn create(&self, user: User) -> Result<(), ServiceError>;
    /// First record whose id matches, or `NotFound`.
    async fn get_by_id(&self, id: Uuid) -> Result<User, ServiceError>;
    /// Snapshot of the whole collection in insertion order.
    async fn get_all(&self) -> Result<Vec<User>, ServiceError>;
    /// Replace the record with the same id in place, or `NotFound`.
    async fn update(&self, user: User) -> Result<(), ServiceError>;
    /// Remove the first record with this id, or `NotFound`.
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

pub(crate) fn replace_in_place(users: &mut [User], user: User) -> Result<(), ServiceError> {
    let slot = users
        .iter_mut()
        .find(|u| u.id == user.id)
        .ok_or_else(|| ServiceError::not_found("user"))?;
    *slot = user;
    Ok(())
}

pub(crate) fn remove_first(users: &mut Vec<User>, id: Uuid) -> Result<(), ServiceError> {
    let index = users
        .iter()
        .position(|u| u.id == id)
        .ok_or_else(|| ServiceError::not_found("user"))?;
    users.remove(index);
    Ok(())
}

pub(crate) fn find_by_id(users: &[User], id: Uuid) -> Result<User, ServiceError> {
    users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .ok_or_else(|| ServiceError::not_found("user"))
}
