// src/db/affiliation_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::affiliation::Affiliation};

#[derive(Clone, Default)]
pub struct AffiliationRepository;

impl AffiliationRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find<'e, E>(
        &self,
        executor: E,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let affiliation = sqlx::query_as::<_, Affiliation>(
            "SELECT * FROM affiliations WHERE employee_id = $1 AND owner_hr_id = $2",
        )
        .bind(employee_id)
        .bind(owner_hr_id)
        .fetch_optional(executor)
        .await?;
        Ok(affiliation)
    }

    /// Locks the pair so a removal and an allocation for the same employee
    /// cannot interleave.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let affiliation = sqlx::query_as::<_, Affiliation>(
            "SELECT * FROM affiliations WHERE employee_id = $1 AND owner_hr_id = $2 FOR UPDATE",
        )
        .bind(employee_id)
        .bind(owner_hr_id)
        .fetch_optional(executor)
        .await?;
        Ok(affiliation)
    }

    /// Inserts under the (employee_id, owner_hr_id) primary key. A duplicate
    /// means another transaction affiliated the pair first.
    pub async fn insert<'e, E>(&self, executor: E, affiliation: &Affiliation) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO affiliations (employee_id, owner_hr_id, company_name, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(affiliation.employee_id)
        .bind(affiliation.owner_hr_id)
        .bind(affiliation.company_name.as_deref())
        .bind(affiliation.status)
        .bind(affiliation.created_at)
        .execute(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::AffiliationRace;
                }
            }
            e.into()
        })?;
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, employee_id: Uuid, owner_hr_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM affiliations WHERE employee_id = $1 AND owner_hr_id = $2")
            .bind(employee_id)
            .bind(owner_hr_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_employee<'e, E>(&self, executor: E, employee_id: Uuid) -> Result<Vec<Affiliation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let affiliations = sqlx::query_as::<_, Affiliation>(
            r#"
            SELECT * FROM affiliations
            WHERE employee_id = $1 AND status = 'active'
            ORDER BY created_at ASC
            "#,
        )
        .bind(employee_id)
        .fetch_all(executor)
        .await?;
        Ok(affiliations)
    }

    pub async fn list_by_owner<'e, E>(&self, executor: E, owner_hr_id: Uuid) -> Result<Vec<Affiliation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let affiliations = sqlx::query_as::<_, Affiliation>(
            r#"
            SELECT * FROM affiliations
            WHERE owner_hr_id = $1 AND status = 'active'
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_hr_id)
        .fetch_all(executor)
        .await?;
        Ok(affiliations)
    }
}
