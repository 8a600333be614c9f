// src/db/memory.rs

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{Store, UnitOfWork},
    models::{
        affiliation::{Affiliation, AffiliationStatus, HrAccount},
        asset::Asset,
        assignment::Assignment,
        request::AssetRequest,
    },
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    assets: HashMap<Uuid, Asset>,
    accounts: HashMap<Uuid, HrAccount>,
    // Keyed by (employee_id, owner_hr_id): the map itself is the unique index.
    affiliations: HashMap<(Uuid, Uuid), Affiliation>,
    requests: HashMap<Uuid, AssetRequest>,
    assignments: HashMap<Uuid, Assignment>,
}

/// In-process store for tests and local runs.
///
/// A unit of work holds the store lock from `begin` until it is committed or
/// dropped, so transactions are fully serialized. Writes go to a private copy
/// of the state that replaces the shared one on `commit`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stands in for registration/billing, which own HR account rows.
    pub async fn seed_account(&self, account: HrAccount) {
        self.state.lock().await.accounts.insert(account.id, account);
    }

    pub async fn account(&self, hr_id: Uuid) -> Option<HrAccount> {
        self.state.lock().await.accounts.get(&hr_id).cloned()
    }

    pub async fn asset(&self, asset_id: Uuid) -> Option<Asset> {
        self.state.lock().await.assets.get(&asset_id).cloned()
    }

    pub async fn request(&self, request_id: Uuid) -> Option<AssetRequest> {
        self.state.lock().await.requests.get(&request_id).cloned()
    }

    pub async fn assignment(&self, assignment_id: Uuid) -> Option<Assignment> {
        self.state.lock().await.assignments.get(&assignment_id).cloned()
    }

    pub async fn affiliation_count(&self, employee_id: Uuid, owner_hr_id: Uuid) -> usize {
        self.state
            .lock()
            .await
            .affiliations
            .values()
            .filter(|a| a.employee_id == employee_id && a.owner_hr_id == owner_hr_id)
            .count()
    }

    pub async fn assignment_count(&self) -> usize {
        self.state.lock().await.assignments.len()
    }
}

pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    work: MemoryState,
}

#[async_trait]
impl Store for MemoryStore {
    type Tx = MemoryUnitOfWork;

    async fn begin(&self) -> Result<MemoryUnitOfWork, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let work = guard.clone();
        Ok(MemoryUnitOfWork { guard, work })
    }
}

// Mirrors the CHECK constraints of the SQL schema.
fn check_asset(asset: &Asset) -> Result<(), AppError> {
    if asset.available_quantity < 0 || asset.available_quantity > asset.total_quantity {
        return Err(AppError::InternalServerError(anyhow!(
            "check constraint violated for asset {}: available {} / total {}",
            asset.id,
            asset.available_quantity,
            asset.total_quantity
        )));
    }
    Ok(())
}

fn check_account(account: &HrAccount) -> Result<(), AppError> {
    if account.current_seat_count < 0 || account.current_seat_count > account.seat_limit {
        return Err(AppError::InternalServerError(anyhow!(
            "check constraint violated for hr account {}: seats {} / limit {}",
            account.id,
            account.current_seat_count,
            account.seat_limit
        )));
    }
    Ok(())
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    // --- Inventory ---

    async fn insert_asset(&mut self, asset: &Asset) -> Result<(), AppError> {
        check_asset(asset)?;
        self.work.assets.insert(asset.id, asset.clone());
        Ok(())
    }

    async fn find_asset(&mut self, asset_id: Uuid) -> Result<Option<Asset>, AppError> {
        Ok(self.work.assets.get(&asset_id).cloned())
    }

    async fn find_asset_for_update(&mut self, asset_id: Uuid) -> Result<Option<Asset>, AppError> {
        Ok(self.work.assets.get(&asset_id).cloned())
    }

    async fn list_assets_by_owner(&mut self, owner_hr_id: Uuid) -> Result<Vec<Asset>, AppError> {
        let mut assets: Vec<Asset> = self
            .work
            .assets
            .values()
            .filter(|a| a.owner_hr_id == owner_hr_id)
            .cloned()
            .collect();
        assets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(assets)
    }

    async fn update_asset_quantities(&mut self, asset: &Asset) -> Result<(), AppError> {
        check_asset(asset)?;
        if let Some(stored) = self.work.assets.get_mut(&asset.id) {
            stored.total_quantity = asset.total_quantity;
            stored.available_quantity = asset.available_quantity;
            stored.updated_at = asset.updated_at;
        }
        Ok(())
    }

    // Same cascade as the foreign keys on asset_requests and assignments.
    async fn delete_asset(&mut self, asset_id: Uuid) -> Result<bool, AppError> {
        let removed = self.work.assets.remove(&asset_id).is_some();
        if removed {
            self.work.requests.retain(|_, r| r.asset_id != asset_id);
            self.work.assignments.retain(|_, a| a.asset_id != asset_id);
        }
        Ok(removed)
    }

    // --- HR accounts ---

    async fn find_account(&mut self, hr_id: Uuid) -> Result<Option<HrAccount>, AppError> {
        Ok(self.work.accounts.get(&hr_id).cloned())
    }

    async fn find_account_for_update(&mut self, hr_id: Uuid) -> Result<Option<HrAccount>, AppError> {
        Ok(self.work.accounts.get(&hr_id).cloned())
    }

    async fn update_seat_count(&mut self, account: &HrAccount) -> Result<(), AppError> {
        if let Some(stored) = self.work.accounts.get_mut(&account.id) {
            stored.current_seat_count = account.current_seat_count;
            check_account(stored)?;
        }
        Ok(())
    }

    // --- Affiliations ---

    async fn find_affiliation(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError> {
        Ok(self.work.affiliations.get(&(employee_id, owner_hr_id)).cloned())
    }

    async fn find_affiliation_for_update(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError> {
        Ok(self.work.affiliations.get(&(employee_id, owner_hr_id)).cloned())
    }

    async fn insert_affiliation(&mut self, affiliation: &Affiliation) -> Result<(), AppError> {
        let key = (affiliation.employee_id, affiliation.owner_hr_id);
        if self.work.affiliations.contains_key(&key) {
            return Err(AppError::AffiliationRace);
        }
        self.work.affiliations.insert(key, affiliation.clone());
        Ok(())
    }

    async fn delete_affiliation(&mut self, employee_id: Uuid, owner_hr_id: Uuid) -> Result<bool, AppError> {
        Ok(self.work.affiliations.remove(&(employee_id, owner_hr_id)).is_some())
    }

    async fn list_affiliations_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Affiliation>, AppError> {
        let mut affiliations: Vec<Affiliation> = self
            .work
            .affiliations
            .values()
            .filter(|a| a.employee_id == employee_id && a.status == AffiliationStatus::Active)
            .cloned()
            .collect();
        affiliations.sort_by_key(|a| a.created_at);
        Ok(affiliations)
    }

    async fn list_affiliations_by_owner(&mut self, owner_hr_id: Uuid) -> Result<Vec<Affiliation>, AppError> {
        let mut affiliations: Vec<Affiliation> = self
            .work
            .affiliations
            .values()
            .filter(|a| a.owner_hr_id == owner_hr_id && a.status == AffiliationStatus::Active)
            .cloned()
            .collect();
        affiliations.sort_by_key(|a| a.created_at);
        Ok(affiliations)
    }

    // --- Requests ---

    async fn insert_request(&mut self, request: &AssetRequest) -> Result<(), AppError> {
        self.work.requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn find_request(&mut self, request_id: Uuid) -> Result<Option<AssetRequest>, AppError> {
        Ok(self.work.requests.get(&request_id).cloned())
    }

    async fn find_request_for_update(&mut self, request_id: Uuid) -> Result<Option<AssetRequest>, AppError> {
        Ok(self.work.requests.get(&request_id).cloned())
    }

    async fn update_request_decision(&mut self, request: &AssetRequest) -> Result<(), AppError> {
        if let Some(stored) = self.work.requests.get_mut(&request.id) {
            stored.status = request.status;
            stored.decided_at = request.decided_at;
            stored.decided_by = request.decided_by;
        }
        Ok(())
    }

    // --- Assignments ---

    async fn insert_assignment(&mut self, assignment: &Assignment) -> Result<(), AppError> {
        self.work.assignments.insert(assignment.id, assignment.clone());
        Ok(())
    }

    async fn find_assignment(&mut self, assignment_id: Uuid) -> Result<Option<Assignment>, AppError> {
        Ok(self.work.assignments.get(&assignment_id).cloned())
    }

    async fn find_assignment_for_update(&mut self, assignment_id: Uuid) -> Result<Option<Assignment>, AppError> {
        Ok(self.work.assignments.get(&assignment_id).cloned())
    }

    async fn update_assignment_status(&mut self, assignment: &Assignment) -> Result<(), AppError> {
        if let Some(stored) = self.work.assignments.get_mut(&assignment.id) {
            stored.status = assignment.status;
            stored.return_requested_at = assignment.return_requested_at;
            stored.returned_at = assignment.returned_at;
        }
        Ok(())
    }

    async fn list_assignments_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Assignment>, AppError> {
        let mut assignments: Vec<Assignment> = self
            .work
            .assignments
            .values()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect();
        assignments.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
        Ok(assignments)
    }

    async fn list_outstanding_assignments(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Vec<Assignment>, AppError> {
        let mut assignments: Vec<Assignment> = self
            .work
            .assignments
            .values()
            .filter(|a| a.employee_id == employee_id && a.owner_hr_id == owner_hr_id && a.is_outstanding())
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.assigned_at);
        Ok(assignments)
    }

    async fn commit(self) -> Result<(), AppError> {
        let MemoryUnitOfWork { mut guard, work } = self;
        *guard = work;
        Ok(())
    }
}
