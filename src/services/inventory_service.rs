// src/services/inventory_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Store, UnitOfWork},
    models::{
        asset::{Asset, AssetType},
        auth::Caller,
    },
};

#[derive(Clone)]
pub struct InventoryLedger<S: Store> {
    store: S,
}

impl<S: Store> InventoryLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // --- REGISTER ASSET ---
    pub async fn register(
        &self,
        caller: &Caller,
        name: &str,
        asset_type: AssetType,
        quantity: i32,
    ) -> Result<Asset, AppError> {
        caller.require_hr()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_field("name", "length", "Name is required."));
        }
        if quantity < 0 {
            return Err(AppError::invalid_field("quantity", "range", "Quantity cannot be negative."));
        }

        let mut tx = self.store.begin().await?;

        let company_name = tx
            .find_account(caller.id)
            .await?
            .and_then(|account| account.company_name);

        let asset = Asset::new(caller.id, company_name, name.to_string(), asset_type, quantity);
        tx.insert_asset(&asset).await?;

        tx.commit().await?;
        Ok(asset)
    }

    pub async fn get(&self, asset_id: Uuid) -> Result<Asset, AppError> {
        let mut tx = self.store.begin().await?;
        tx.find_asset(asset_id)
            .await?
            .ok_or(AppError::NotFound("Asset"))
    }

    pub async fn list(&self, owner_hr_id: Uuid) -> Result<Vec<Asset>, AppError> {
        let mut tx = self.store.begin().await?;
        tx.list_assets_by_owner(owner_hr_id).await
    }

    // --- ADJUST TOTAL (owner edit) ---
    pub async fn adjust_total(&self, caller: &Caller, asset_id: Uuid, delta: i32) -> Result<Asset, AppError> {
        let mut tx = self.store.begin().await?;

        // 1. Locks the asset against concurrent allocations
        let mut asset = tx
            .find_asset_for_update(asset_id)
            .await?
            .ok_or(AppError::NotFound("Asset"))?;

        if asset.owner_hr_id != caller.id {
            return Err(AppError::Forbidden("asset belongs to another HR account"));
        }

        // 2. Same delta on total and available
        asset.adjust_total(delta)?;
        tx.update_asset_quantities(&asset).await?;

        tx.commit().await?;

        tracing::info!(
            asset_id = %asset.id,
            delta,
            total = asset.total_quantity,
            available = asset.available_quantity,
            "Asset quantity adjusted"
        );
        Ok(asset)
    }

    // --- REMOVE ASSET ---
    pub async fn remove(&self, caller: &Caller, asset_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.store.begin().await?;

        let asset = tx
            .find_asset_for_update(asset_id)
            .await?
            .ok_or(AppError::NotFound("Asset"))?;

        if asset.owner_hr_id != caller.id {
            return Err(AppError::Forbidden("asset belongs to another HR account"));
        }
        if asset.assigned_units() > 0 {
            return Err(AppError::InvalidState(format!(
                "{} unit(s) are still assigned to employees.",
                asset.assigned_units()
            )));
        }

        tx.delete_asset(asset_id).await?;
        tx.commit().await?;
        Ok(())
    }
}

// ---
// Stock primitives. Only the allocation coordinator calls these, always
// inside its own unit of work.
// ---

/// Takes one unit from an asset already locked by `tx`.
pub(crate) async fn decrement<U: UnitOfWork>(tx: &mut U, asset: &mut Asset) -> Result<(), AppError> {
    asset.take_unit()?;
    tx.update_asset_quantities(asset).await
}

/// Locks the asset and puts one unit back.
pub(crate) async fn increment<U: UnitOfWork>(tx: &mut U, asset_id: Uuid) -> Result<Asset, AppError> {
    let mut asset = tx
        .find_asset_for_update(asset_id)
        .await?
        .ok_or(AppError::NotFound("Asset"))?;
    asset.release_unit();
    tx.update_asset_quantities(&asset).await?;
    Ok(asset)
}
