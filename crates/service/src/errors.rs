use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("name cannot be empty")]
    InvalidName,
    #[error("email cannot be empty")]
    InvalidEmail,
    #[error("invalid email format")]
    InvalidEmailFormat,
    #[error("corrupt data: {0}")]
    CorruptData(String),
    #[error("storage io error: {0}")]
    StorageIo(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Caller-correctable input errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidName | Self::InvalidEmail | Self::InvalidEmailFormat)
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidName => 1001,
            ServiceError::InvalidEmail => 1002,
            ServiceError::InvalidEmailFormat => 1003,
            ServiceError::NotFound(_) => 1004,
            ServiceError::CorruptData(_) => 1201,
            ServiceError::StorageIo(_) => 1202,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidName => ServiceError::InvalidName,
            ModelError::InvalidEmail => ServiceError::InvalidEmail,
            ModelError::InvalidEmailFormat => ServiceError::InvalidEmailFormat,
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self { ServiceError::StorageIo(e.to_string()) }
}
