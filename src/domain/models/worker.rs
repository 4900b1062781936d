use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub type Role = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerId(Uuid);
impl WorkerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WorkerId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);
impl Email {
    pub fn new(value: String) -> Result<Self, DomainError> {
        // local@host, nothing fancier
        let mut parts = value.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let host = parts.next().unwrap_or("");
        if local.is_empty() || host.is_empty() {
            return Err(DomainError::InvalidEmail);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    id: WorkerId,
    name: String,
    email: Email,
    phone: Option<String>,
    role: Role,
}

impl Worker {
    pub fn new(
        id: Uuid,
        name: String,
        email: Email,
        phone: Option<String>,
        role: Role,
    ) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }

        let id = WorkerId(id);
        Ok(Self {
            id,
            name,
            email,
            phone,
            role,
        })
    }

    pub fn id(&self) -> &WorkerId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &Email {
        &self.email
    }
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    pub fn role(&self) -> &str {
        &self.role
    }
}
