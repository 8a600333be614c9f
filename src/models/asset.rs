// src/models/asset.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "asset_type", rename_all = "snake_case")] // DB
#[serde(rename_all = "snake_case")] // JSON
pub enum AssetType {
    Returnable,
    NonReturnable,
}

// ---
// Snapshot copied onto requests and assignments at creation time.
// Later edits to the asset never touch it.
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    #[sqlx(rename = "asset_name")]
    pub name: String,
    pub asset_type: AssetType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub owner_hr_id: Uuid,
    pub company_name: Option<String>,
    #[schema(example = "Dell Latitude 7440")]
    pub name: String,
    pub asset_type: AssetType,
    pub total_quantity: i32,
    pub available_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(
        owner_hr_id: Uuid,
        company_name: Option<String>,
        name: String,
        asset_type: AssetType,
        quantity: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_hr_id,
            company_name,
            name,
            asset_type,
            total_quantity: quantity,
            available_quantity: quantity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn snapshot(&self) -> AssetSnapshot {
        AssetSnapshot {
            name: self.name.clone(),
            asset_type: self.asset_type,
        }
    }

    /// Units currently held by employees.
    pub fn assigned_units(&self) -> i32 {
        self.total_quantity - self.available_quantity
    }

    /// Takes one unit out of stock for an assignment.
    pub fn take_unit(&mut self) -> Result<(), AppError> {
        if self.available_quantity < 1 {
            return Err(AppError::OutOfStock);
        }
        self.available_quantity = (self.available_quantity - 1).max(0);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Puts one returned unit back into stock, never above the total.
    pub fn release_unit(&mut self) {
        if self.available_quantity >= self.total_quantity {
            tracing::warn!(
                asset_id = %self.id,
                "Returned unit would exceed total quantity; keeping available at total"
            );
            self.available_quantity = self.total_quantity;
        } else {
            self.available_quantity += 1;
        }
        self.updated_at = Utc::now();
    }

    /// Owner edit of the total: the same delta is applied to the available
    /// counter so units already assigned stay accounted for.
    pub fn adjust_total(&mut self, delta: i32) -> Result<(), AppError> {
        let total = self
            .total_quantity
            .checked_add(delta)
            .ok_or_else(|| AppError::invalid_field("delta", "range", "Quantity change is too large."))?;
        let available = self.available_quantity + delta;

        if available < 0 {
            return Err(AppError::InvalidState(format!(
                "Total cannot drop below the {} unit(s) currently assigned.",
                self.assigned_units()
            )));
        }

        self.total_quantity = total;
        self.available_quantity = available;
        self.updated_at = Utc::now();
        Ok(())
    }
}
