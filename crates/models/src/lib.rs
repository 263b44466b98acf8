//! Domain types shared by the service and transport layers.
//! - `user`: the persisted record, create input, and partial-update descriptor.
//! - `errors`: field validation failures.

pub mod errors;
pub mod user;

pub use user::{NewUser, UpdateUser, User};
