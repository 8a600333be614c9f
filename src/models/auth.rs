// src/models/auth.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Hr,
    Employee,
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hr" => Ok(Role::Hr),
            "employee" => Ok(Role::Employee),
            _ => Err(AppError::Unauthenticated),
        }
    }
}

// Identity handed to us by the gateway. Credentials are never checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
}

impl Caller {
    pub fn hr(id: Uuid, email: impl Into<String>) -> Self {
        Self { id, role: Role::Hr, email: email.into() }
    }

    pub fn employee(id: Uuid, email: impl Into<String>) -> Self {
        Self { id, role: Role::Employee, email: email.into() }
    }

    pub fn require_hr(&self) -> Result<(), AppError> {
        match self.role {
            Role::Hr => Ok(()),
            Role::Employee => Err(AppError::Forbidden("HR only")),
        }
    }
}
