// src/models/request.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::asset::{Asset, AssetSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// HR's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    pub id: Uuid,
    pub asset_id: Uuid,
    #[sqlx(flatten)]
    pub asset: AssetSnapshot,
    pub requester_id: Uuid,
    pub owner_hr_id: Uuid,
    pub company_name: Option<String>,
    pub note: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decided_by: Option<Uuid>,
}

impl AssetRequest {
    pub fn new(asset: &Asset, requester_id: Uuid, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id: asset.id,
            asset: asset.snapshot(),
            requester_id,
            owner_hr_id: asset.owner_hr_id,
            company_name: asset.company_name.clone(),
            note,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            decided_at: None,
            decided_by: None,
        }
    }

    pub fn ensure_pending(&self) -> Result<(), AppError> {
        match self.status {
            RequestStatus::Pending => Ok(()),
            _ => Err(AppError::AlreadyProcessed),
        }
    }

    pub fn approve(&mut self, decided_by: Uuid) -> Result<(), AppError> {
        self.decide(RequestStatus::Approved, decided_by)
    }

    pub fn reject(&mut self, decided_by: Uuid) -> Result<(), AppError> {
        self.decide(RequestStatus::Rejected, decided_by)
    }

    fn decide(&mut self, status: RequestStatus, decided_by: Uuid) -> Result<(), AppError> {
        self.ensure_pending()?;
        self.status = status;
        self.decided_at = Some(Utc::now());
        self.decided_by = Some(decided_by);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::AssetType;

    fn request() -> AssetRequest {
        let asset = Asset::new(Uuid::new_v4(), Some("Acme".into()), "Laptop".into(), AssetType::Returnable, 3);
        AssetRequest::new(&asset, Uuid::new_v4(), None)
    }

    #[test]
    fn new_request_snapshots_asset() {
        let req = request();
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.asset.name, "Laptop");
        assert_eq!(req.company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn decisions_are_terminal() {
        let hr = Uuid::new_v4();
        let mut req = request();

        req.reject(hr).unwrap();
        assert_eq!(req.decided_by, Some(hr));
        assert!(req.decided_at.is_some());

        assert!(matches!(req.approve(hr), Err(AppError::AlreadyProcessed)));
        assert!(matches!(req.reject(hr), Err(AppError::AlreadyProcessed)));
        assert_eq!(req.status, RequestStatus::Rejected);
    }
}
