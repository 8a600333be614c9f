// src/db/store.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        affiliation::{Affiliation, HrAccount},
        asset::Asset,
        assignment::Assignment,
        request::AssetRequest,
    },
};

/// Source of units of work. Cheap to clone; every service holds one.
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    type Tx: UnitOfWork;

    async fn begin(&self) -> Result<Self::Tx, AppError>;
}

/// One atomic transaction over every record the allocation flows touch.
///
/// Nothing is visible to other units of work until `commit`. Dropping the
/// value without committing discards every write made through it.
///
/// The `*_for_update` reads lock the row for the rest of the transaction, so
/// two units of work racing on the same asset, account, affiliation, request or assignment
/// run one after the other.
#[async_trait]
pub trait UnitOfWork: Send + 'static {
    // --- Inventory ---
    async fn insert_asset(&mut self, asset: &Asset) -> Result<(), AppError>;
    async fn find_asset(&mut self, asset_id: Uuid) -> Result<Option<Asset>, AppError>;
    async fn find_asset_for_update(&mut self, asset_id: Uuid) -> Result<Option<Asset>, AppError>;
    async fn list_assets_by_owner(&mut self, owner_hr_id: Uuid) -> Result<Vec<Asset>, AppError>;
    async fn update_asset_quantities(&mut self, asset: &Asset) -> Result<(), AppError>;
    async fn delete_asset(&mut self, asset_id: Uuid) -> Result<bool, AppError>;

    // --- HR accounts ---
    async fn find_account(&mut self, hr_id: Uuid) -> Result<Option<HrAccount>, AppError>;
    async fn find_account_for_update(&mut self, hr_id: Uuid) -> Result<Option<HrAccount>, AppError>;
    async fn update_seat_count(&mut self, account: &HrAccount) -> Result<(), AppError>;

    // --- Affiliations ---
    async fn find_affiliation(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError>;
    async fn find_affiliation_for_update(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError>;
    /// Fails with `AppError::AffiliationRace` if the pair already exists.
    async fn insert_affiliation(&mut self, affiliation: &Affiliation) -> Result<(), AppError>;
    async fn delete_affiliation(&mut self, employee_id: Uuid, owner_hr_id: Uuid) -> Result<bool, AppError>;
    async fn list_affiliations_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Affiliation>, AppError>;
    async fn list_affiliations_by_owner(&mut self, owner_hr_id: Uuid) -> Result<Vec<Affiliation>, AppError>;

    // --- Requests ---
    async fn insert_request(&mut self, request: &AssetRequest) -> Result<(), AppError>;
    async fn find_request(&mut self, request_id: Uuid) -> Result<Option<AssetRequest>, AppError>;
    async fn find_request_for_update(&mut self, request_id: Uuid) -> Result<Option<AssetRequest>, AppError>;
    async fn update_request_decision(&mut self, request: &AssetRequest) -> Result<(), AppError>;

    // --- Assignments ---
    async fn insert_assignment(&mut self, assignment: &Assignment) -> Result<(), AppError>;
    async fn find_assignment(&mut self, assignment_id: Uuid) -> Result<Option<Assignment>, AppError>;
    async fn find_assignment_for_update(&mut self, assignment_id: Uuid) -> Result<Option<Assignment>, AppError>;
    async fn update_assignment_status(&mut self, assignment: &Assignment) -> Result<(), AppError>;
    async fn list_assignments_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Assignment>, AppError>;
    async fn list_outstanding_assignments(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Vec<Assignment>, AppError>;

    async fn commit(self) -> Result<(), AppError>;
}
