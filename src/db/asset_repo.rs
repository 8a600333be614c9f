// src/db/asset_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::asset::Asset};

#[derive(Clone, Default)]
pub struct AssetRepository;

impl AssetRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, asset: &Asset) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO assets (
                id, owner_hr_id, company_name, name, asset_type,
                total_quantity, available_quantity, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(asset.id)
        .bind(asset.owner_hr_id)
        .bind(asset.company_name.as_deref())
        .bind(&asset.name)
        .bind(asset.asset_type)
        .bind(asset.total_quantity)
        .bind(asset.available_quantity)
        .bind(asset.created_at)
        .bind(asset.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find<'e, E>(&self, executor: E, asset_id: Uuid) -> Result<Option<Asset>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(asset_id)
            .fetch_optional(executor)
            .await?;
        Ok(asset)
    }

    /// Locks the asset row until the surrounding transaction ends.
    pub async fn find_for_update<'e, E>(&self, executor: E, asset_id: Uuid) -> Result<Option<Asset>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(asset_id)
            .fetch_optional(executor)
            .await?;
        Ok(asset)
    }

    pub async fn list_by_owner<'e, E>(&self, executor: E, owner_hr_id: Uuid) -> Result<Vec<Asset>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assets = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE owner_hr_id = $1 ORDER BY name ASC",
        )
        .bind(owner_hr_id)
        .fetch_all(executor)
        .await?;
        Ok(assets)
    }

    // The CHECK constraint on the table rejects any pair outside 0 <= available <= total.
    pub async fn update_quantities<'e, E>(&self, executor: E, asset: &Asset) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE assets
            SET total_quantity = $2, available_quantity = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(asset.id)
        .bind(asset.total_quantity)
        .bind(asset.available_quantity)
        .bind(asset.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, asset_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(asset_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
