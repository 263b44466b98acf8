use thiserror::Error;

/// Field validation failures. Checked in declaration order: name, then email
/// presence, then email format.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("name cannot be empty")]
    InvalidName,
    #[error("email cannot be empty")]
    InvalidEmail,
    #[error("invalid email format")]
    InvalidEmailFormat,
}
