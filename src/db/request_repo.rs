// src/db/request_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::request::AssetRequest};

#[derive(Clone, Default)]
pub struct RequestRepository;

impl RequestRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, request: &AssetRequest) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO asset_requests (
                id, asset_id, asset_name, asset_type, requester_id, owner_hr_id,
                company_name, note, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(request.id)
        .bind(request.asset_id)
        .bind(&request.asset.name)
        .bind(request.asset.asset_type)
        .bind(request.requester_id)
        .bind(request.owner_hr_id)
        .bind(request.company_name.as_deref())
        .bind(request.note.as_deref())
        .bind(request.status)
        .bind(request.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find<'e, E>(&self, executor: E, request_id: Uuid) -> Result<Option<AssetRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, AssetRequest>("SELECT * FROM asset_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(executor)
            .await?;
        Ok(request)
    }

    /// Locks the request so a second decision waits for the first to finish.
    pub async fn find_for_update<'e, E>(&self, executor: E, request_id: Uuid) -> Result<Option<AssetRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, AssetRequest>(
            "SELECT * FROM asset_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(executor)
        .await?;
        Ok(request)
    }

    pub async fn update_decision<'e, E>(&self, executor: E, request: &AssetRequest) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE asset_requests
            SET status = $2, decided_at = $3, decided_by = $4
            WHERE id = $1
            "#,
        )
        .bind(request.id)
        .bind(request.status)
        .bind(request.decided_at)
        .bind(request.decided_by)
        .execute(executor)
        .await?;
        Ok(())
    }
}
