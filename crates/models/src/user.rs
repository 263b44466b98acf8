use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// A persisted user record.
///
/// Serialized as `{"id": "<uuid>", "name": "...", "email": "..."}` both on disk
/// and on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Create input. The identity is always assigned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into() }
    }

    /// Validate name, then email presence, then email format.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_email(&self.email)
    }

    /// Attach an identity, producing the record to persist.
    pub fn into_user(self, id: Uuid) -> User {
        User { id, name: self.name, email: self.email }
    }
}

/// Partial-update descriptor.
///
/// `None` leaves a field unchanged; `Some("")` is rejected by validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUser {
    pub fn new(id: Uuid) -> Self {
        Self { id, name: None, email: None }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Merge the present fields into `user`. Nothing is written unless every
    /// present field is valid.
    pub fn apply_to(&self, user: &mut User) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::InvalidName);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if email.is_empty() {
        return Err(ModelError::InvalidEmail);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ModelError::InvalidEmailFormat);
    }
    Ok(())
}
