// src/models/affiliation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "affiliation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AffiliationStatus {
    Active,
    Inactive,
}

// ---
// Affiliation (employee <-> HR membership)
// ---
// At most one row per (employee_id, owner_hr_id). Each one occupies a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    pub employee_id: Uuid,
    pub owner_hr_id: Uuid,
    pub company_name: Option<String>,
    pub status: AffiliationStatus,
    pub created_at: DateTime<Utc>,
}

impl Affiliation {
    pub fn new(employee_id: Uuid, owner_hr_id: Uuid, company_name: Option<String>) -> Self {
        Self {
            employee_id,
            owner_hr_id,
            company_name,
            status: AffiliationStatus::Active,
            created_at: Utc::now(),
        }
    }
}

// ---
// HR account seat quota
// ---
// `seat_limit` belongs to billing; only `current_seat_count` is written here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HrAccount {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub seat_limit: i32,
    pub current_seat_count: i32,
}

impl HrAccount {
    pub fn new(id: Uuid, company_name: Option<String>, seat_limit: i32) -> Self {
        Self {
            id,
            company_name,
            seat_limit,
            current_seat_count: 0,
        }
    }

    pub fn claim_seat(&mut self) -> Result<(), AppError> {
        if self.current_seat_count + 1 > self.seat_limit {
            return Err(AppError::QuotaExceeded);
        }
        self.current_seat_count += 1;
        Ok(())
    }

    pub fn release_seat(&mut self) {
        self.current_seat_count = (self.current_seat_count - 1).max(0);
    }
}
