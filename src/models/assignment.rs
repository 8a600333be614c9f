// src/models/assignment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::asset::{Asset, AssetSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    ReturnRequested,
    Returned,
}

/// How an assigned unit is being brought back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReclaimMode {
    /// Employee asks to hand the unit back; stock is untouched until HR approves.
    EmployeeReturn,
    /// HR confirms a requested return and the unit goes back into stock.
    HrApprovedReturn,
    /// HR takes the unit back without the employee's consent.
    ForcedReturn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub asset_id: Uuid,
    #[sqlx(flatten)]
    pub asset: AssetSnapshot,
    pub employee_id: Uuid,
    pub owner_hr_id: Uuid,
    pub request_id: Option<Uuid>,
    pub status: AssignmentStatus,
    pub assigned_at: DateTime<Utc>,
    pub return_requested_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn new(asset: &Asset, employee_id: Uuid, request_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id: asset.id,
            asset: asset.snapshot(),
            employee_id,
            owner_hr_id: asset.owner_hr_id,
            request_id,
            status: AssignmentStatus::Assigned,
            assigned_at: Utc::now(),
            return_requested_at: None,
            returned_at: None,
        }
    }

    /// Still held by the employee.
    pub fn is_outstanding(&self) -> bool {
        matches!(
            self.status,
            AssignmentStatus::Assigned | AssignmentStatus::ReturnRequested
        )
    }

    pub fn request_return(&mut self) -> Result<(), AppError> {
        if self.status != AssignmentStatus::Assigned {
            return Err(AppError::InvalidState(
                "Only assigned assets can be returned.".to_string(),
            ));
        }
        self.status = AssignmentStatus::ReturnRequested;
        self.return_requested_at = Some(Utc::now());
        Ok(())
    }

    pub fn complete_return(&mut self) -> Result<(), AppError> {
        if self.status != AssignmentStatus::ReturnRequested {
            return Err(AppError::InvalidState(
                "No return has been requested for this assignment.".to_string(),
            ));
        }
        self.status = AssignmentStatus::Returned;
        self.returned_at = Some(Utc::now());
        Ok(())
    }

    pub fn force_return(&mut self) -> Result<(), AppError> {
        if !self.is_outstanding() {
            return Err(AppError::InvalidState(
                "This assignment has already been returned.".to_string(),
            ));
        }
        self.status = AssignmentStatus::Returned;
        self.returned_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::AssetType;

    fn assignment() -> Assignment {
        let asset = Asset::new(Uuid::new_v4(), None, "Headset".into(), AssetType::Returnable, 1);
        Assignment::new(&asset, Uuid::new_v4(), None)
    }

    #[test]
    fn return_goes_through_request_then_approval() {
        let mut a = assignment();

        assert!(matches!(a.complete_return(), Err(AppError::InvalidState(_))));

        a.request_return().unwrap();
        assert_eq!(a.status, AssignmentStatus::ReturnRequested);
        assert!(a.return_requested_at.is_some());
        assert!(matches!(a.request_return(), Err(AppError::InvalidState(_))));

        a.complete_return().unwrap();
        assert_eq!(a.status, AssignmentStatus::Returned);
        assert!(!a.is_outstanding());
    }

    #[test]
    fn forced_return_skips_the_request() {
        let mut a = assignment();
        a.force_return().unwrap();
        assert_eq!(a.status, AssignmentStatus::Returned);
        assert!(matches!(a.force_return(), Err(AppError::InvalidState(_))));
    }
}
