// src/services/allocation_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Store, UnitOfWork},
    models::{
        affiliation::Affiliation,
        allocation::{Allocation, ReclaimFailure, RemovalReport},
        asset::AssetType,
        assignment::{Assignment, ReclaimMode},
        auth::Caller,
        request::AssetRequest,
    },
    services::inventory_service::{decrement, increment},
};

/// The only writer of stock counters, seat counts, affiliations and
/// assignment state. Every public operation is one unit of work.
#[derive(Clone)]
pub struct AllocationCoordinator<S: Store> {
    store: S,
}

impl<S: Store> AllocationCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // --- ALLOCATE ---

    /// Runs the allocation inside a unit of work owned by the caller.
    ///
    /// Nothing is committed here. On error the caller drops `tx` and every
    /// write made so far is discarded.
    pub(crate) async fn allocate_in<U: UnitOfWork>(
        &self,
        tx: &mut U,
        asset_id: Uuid,
        employee_id: Uuid,
        owner_hr_id: Uuid,
        request: Option<&mut AssetRequest>,
    ) -> Result<Allocation, AppError> {
        // 1. Asset row lock
        let mut asset = tx
            .find_asset_for_update(asset_id)
            .await?
            .ok_or(AppError::NotFound("Asset"))?;

        if asset.owner_hr_id != owner_hr_id {
            return Err(AppError::Forbidden("asset belongs to another HR account"));
        }

        // 2. Stock before anything else
        if asset.available_quantity < 1 {
            return Err(AppError::OutOfStock);
        }

        // 3 + 4. Affiliation, taking a seat if this is the first allocation.
        // The row lock keeps a concurrent removal from listing outstanding
        // assignments before this one commits.
        let existing = tx.find_affiliation_for_update(employee_id, owner_hr_id).await?;
        let (affiliation, affiliation_created) = match existing {
            Some(existing) => (existing, false),
            None => {
                let mut account = tx
                    .find_account_for_update(owner_hr_id)
                    .await?
                    .ok_or(AppError::NotFound("HR account"))?;

                // A first allocation for the same employee may have committed
                // while this one waited on the account lock.
                match tx.find_affiliation_for_update(employee_id, owner_hr_id).await? {
                    Some(existing) => (existing, false),
                    None => {
                        account.claim_seat()?;

                        let affiliation = Affiliation::new(employee_id, owner_hr_id, account.company_name.clone());
                        tx.insert_affiliation(&affiliation).await?;
                        tx.update_seat_count(&account).await?;

                        tracing::info!(
                            %employee_id,
                            %owner_hr_id,
                            seats = account.current_seat_count,
                            limit = account.seat_limit,
                            "Affiliation created"
                        );
                        (affiliation, true)
                    }
                }
            }
        };

        // 5. Stock
        decrement(tx, &mut asset).await?;

        // 6. Assignment
        let request_id = request.as_ref().map(|r| r.id);
        let assignment = Assignment::new(&asset, employee_id, request_id);
        tx.insert_assignment(&assignment).await?;

        // 7. Request outcome
        if let Some(request) = request {
            request.approve(owner_hr_id)?;
            tx.update_request_decision(request).await?;
        }

        Ok(Allocation {
            assignment,
            affiliation,
            affiliation_created,
            asset,
        })
    }

    /// HR hands an asset straight to an employee, no request involved.
    pub async fn direct_assign(
        &self,
        caller: &Caller,
        asset_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Allocation, AppError> {
        caller.require_hr()?;

        let mut tx = self.store.begin().await?;
        let allocation = self.allocate_in(&mut tx, asset_id, employee_id, caller.id, None).await?;
        tx.commit().await?;

        tracing::info!(
            assignment_id = %allocation.assignment.id,
            %asset_id,
            %employee_id,
            available = allocation.asset.available_quantity,
            "Asset assigned directly"
        );
        Ok(allocation)
    }

    // --- RETURNS ---

    pub async fn reclaim(
        &self,
        caller: &Caller,
        assignment_id: Uuid,
        mode: ReclaimMode,
    ) -> Result<Assignment, AppError> {
        let mut tx = self.store.begin().await?;

        let mut assignment = tx
            .find_assignment_for_update(assignment_id)
            .await?
            .ok_or(AppError::NotFound("Assignment"))?;

        match mode {
            ReclaimMode::EmployeeReturn => {
                if assignment.employee_id != caller.id {
                    return Err(AppError::Forbidden("assignment belongs to another employee"));
                }
                if assignment.asset.asset_type != AssetType::Returnable {
                    return Err(AppError::Forbidden("non-returnable assets cannot be returned"));
                }
                assignment.request_return()?;
            }
            ReclaimMode::HrApprovedReturn => {
                ensure_owner(caller, &assignment)?;
                assignment.complete_return()?;
                increment(&mut tx, assignment.asset_id).await?;
            }
            ReclaimMode::ForcedReturn => {
                ensure_owner(caller, &assignment)?;
                assignment.force_return()?;
                increment(&mut tx, assignment.asset_id).await?;
            }
        }

        tx.update_assignment_status(&assignment).await?;
        tx.commit().await?;

        tracing::info!(
            %assignment_id,
            ?mode,
            status = ?assignment.status,
            "Assignment reclaim applied"
        );
        Ok(assignment)
    }

    pub async fn request_return(&self, caller: &Caller, assignment_id: Uuid) -> Result<Assignment, AppError> {
        self.reclaim(caller, assignment_id, ReclaimMode::EmployeeReturn).await
    }

    pub async fn approve_return(&self, caller: &Caller, assignment_id: Uuid) -> Result<Assignment, AppError> {
        self.reclaim(caller, assignment_id, ReclaimMode::HrApprovedReturn).await
    }

    // --- REMOVE EMPLOYEE ---

    pub async fn remove_affiliation(
        &self,
        caller: &Caller,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<RemovalReport, AppError> {
        caller.require_hr()?;
        if caller.id != owner_hr_id {
            return Err(AppError::Forbidden("affiliation belongs to another HR account"));
        }

        // 1. Affiliation and seat go together. Account first, same order as
        // a first allocation.
        let mut tx = self.store.begin().await?;

        let account = tx.find_account_for_update(owner_hr_id).await?;

        let affiliation = tx
            .find_affiliation_for_update(employee_id, owner_hr_id)
            .await?
            .ok_or(AppError::NotFound("Affiliation"))?;

        // Only the transaction that actually deletes the row gives the seat back
        if !tx.delete_affiliation(employee_id, owner_hr_id).await? {
            return Err(AppError::NotFound("Affiliation"));
        }

        if let Some(mut account) = account {
            account.release_seat();
            tx.update_seat_count(&account).await?;
        }

        let outstanding = tx.list_outstanding_assignments(employee_id, owner_hr_id).await?;
        tx.commit().await?;

        // 2. One unit of work per assignment; keep going past failures
        let mut reclaimed = Vec::with_capacity(outstanding.len());
        let mut failed = Vec::new();

        for assignment in outstanding {
            match self.reclaim(caller, assignment.id, ReclaimMode::ForcedReturn).await {
                Ok(_) => reclaimed.push(assignment.id),
                Err(e) => {
                    tracing::warn!(
                        assignment_id = %assignment.id,
                        %employee_id,
                        error = %e,
                        "Forced return failed during employee removal"
                    );
                    failed.push(ReclaimFailure {
                        assignment_id: assignment.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            %employee_id,
            %owner_hr_id,
            reclaimed = reclaimed.len(),
            failed = failed.len(),
            "Employee removed from company"
        );

        Ok(RemovalReport {
            affiliation,
            reclaimed,
            failed,
        })
    }
}

fn ensure_owner(caller: &Caller, assignment: &Assignment) -> Result<(), AppError> {
    if assignment.owner_hr_id != caller.id {
        return Err(AppError::Forbidden("assignment belongs to another HR account"));
    }
    Ok(())
}
