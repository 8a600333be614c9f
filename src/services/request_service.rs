// src/services/request_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Store, UnitOfWork},
    models::{
        allocation::Allocation,
        auth::Caller,
        request::{AssetRequest, Decision},
    },
    services::allocation_service::AllocationCoordinator,
};

pub const MAX_NOTE_LEN: usize = 500;

#[derive(Clone)]
pub struct RequestWorkflow<S: Store> {
    store: S,
    coordinator: AllocationCoordinator<S>,
}

impl<S: Store> RequestWorkflow<S> {
    pub fn new(store: S, coordinator: AllocationCoordinator<S>) -> Self {
        Self { store, coordinator }
    }

    // --- CREATE ---
    pub async fn create(
        &self,
        caller: &Caller,
        asset_id: Uuid,
        note: Option<String>,
    ) -> Result<AssetRequest, AppError> {
        if note.as_deref().is_some_and(|n| n.chars().count() > MAX_NOTE_LEN) {
            return Err(AppError::invalid_field(
                "note",
                "length",
                "Note cannot exceed 500 characters.",
            ));
        }

        let mut tx = self.store.begin().await?;

        // Read only: the request keeps a snapshot, not a reference
        let asset = tx
            .find_asset(asset_id)
            .await?
            .ok_or(AppError::NotFound("Asset"))?;

        let request = AssetRequest::new(&asset, caller.id, note);
        tx.insert_request(&request).await?;

        tx.commit().await?;
        Ok(request)
    }

    // --- DECIDE ---

    /// Approving allocates in the same unit of work, so the request only
    /// flips to `approved` if stock, seat and assignment all went through.
    pub async fn decide(
        &self,
        caller: &Caller,
        request_id: Uuid,
        decision: Decision,
    ) -> Result<(AssetRequest, Option<Allocation>), AppError> {
        let mut tx = self.store.begin().await?;

        // Locked first, so a concurrent second decision waits and then sees ours
        let mut request = tx
            .find_request_for_update(request_id)
            .await?
            .ok_or(AppError::NotFound("Request"))?;

        if request.owner_hr_id != caller.id {
            return Err(AppError::Forbidden("request belongs to another HR account"));
        }
        request.ensure_pending()?;

        let allocation = match decision {
            Decision::Reject => {
                request.reject(caller.id)?;
                tx.update_request_decision(&request).await?;
                None
            }
            Decision::Approve => {
                let allocation = self
                    .coordinator
                    .allocate_in(
                        &mut tx,
                        request.asset_id,
                        request.requester_id,
                        request.owner_hr_id,
                        Some(&mut request),
                    )
                    .await?;
                Some(allocation)
            }
        };

        tx.commit().await?;

        tracing::info!(
            %request_id,
            ?decision,
            decided_by = %caller.id,
            "Asset request decided"
        );
        Ok((request, allocation))
    }

    pub async fn get(&self, caller: &Caller, request_id: Uuid) -> Result<AssetRequest, AppError> {
        let mut tx = self.store.begin().await?;
        let request = tx
            .find_request(request_id)
            .await?
            .ok_or(AppError::NotFound("Request"))?;

        if request.requester_id != caller.id && request.owner_hr_id != caller.id {
            return Err(AppError::Forbidden("request belongs to someone else"));
        }
        Ok(request)
    }
}
