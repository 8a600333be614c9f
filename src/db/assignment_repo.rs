// src/db/assignment_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::assignment::Assignment};

#[derive(Clone, Default)]
pub struct AssignmentRepository;

impl AssignmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, assignment: &Assignment) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO assignments (
                id, asset_id, asset_name, asset_type, employee_id, owner_hr_id,
                request_id, status, assigned_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.asset_id)
        .bind(&assignment.asset.name)
        .bind(assignment.asset.asset_type)
        .bind(assignment.employee_id)
        .bind(assignment.owner_hr_id)
        .bind(assignment.request_id)
        .bind(assignment.status)
        .bind(assignment.assigned_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find<'e, E>(&self, executor: E, assignment_id: Uuid) -> Result<Option<Assignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
            .bind(assignment_id)
            .fetch_optional(executor)
            .await?;
        Ok(assignment)
    }

    pub async fn find_for_update<'e, E>(&self, executor: E, assignment_id: Uuid) -> Result<Option<Assignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE id = $1 FOR UPDATE",
        )
        .bind(assignment_id)
        .fetch_optional(executor)
        .await?;
        Ok(assignment)
    }

    pub async fn update_status<'e, E>(&self, executor: E, assignment: &Assignment) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE assignments
            SET status = $2, return_requested_at = $3, returned_at = $4
            WHERE id = $1
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.status)
        .bind(assignment.return_requested_at)
        .bind(assignment.returned_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn list_by_employee<'e, E>(&self, executor: E, employee_id: Uuid) -> Result<Vec<Assignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignments = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE employee_id = $1 ORDER BY assigned_at DESC",
        )
        .bind(employee_id)
        .fetch_all(executor)
        .await?;
        Ok(assignments)
    }

    pub async fn list_outstanding<'e, E>(
        &self,
        executor: E,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Vec<Assignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignments = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT * FROM assignments
            WHERE employee_id = $1
              AND owner_hr_id = $2
              AND status IN ('assigned', 'return_requested')
            ORDER BY assigned_at ASC
            "#,
        )
        .bind(employee_id)
        .bind(owner_hr_id)
        .fetch_all(executor)
        .await?;
        Ok(assignments)
    }
}
