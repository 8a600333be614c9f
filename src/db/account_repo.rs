// src/db/account_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::affiliation::HrAccount};

// Rows are created by registration and billing; this side only reads the
// limit and moves the seat counter.
#[derive(Clone, Default)]
pub struct AccountRepository;

impl AccountRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find<'e, E>(&self, executor: E, hr_id: Uuid) -> Result<Option<HrAccount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let account = sqlx::query_as::<_, HrAccount>(
            "SELECT id, company_name, seat_limit, current_seat_count FROM hr_accounts WHERE id = $1",
        )
        .bind(hr_id)
        .fetch_optional(executor)
        .await?;
        Ok(account)
    }

    pub async fn find_for_update<'e, E>(&self, executor: E, hr_id: Uuid) -> Result<Option<HrAccount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let account = sqlx::query_as::<_, HrAccount>(
            r#"
            SELECT id, company_name, seat_limit, current_seat_count
            FROM hr_accounts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(hr_id)
        .fetch_optional(executor)
        .await?;
        Ok(account)
    }

    pub async fn update_seat_count<'e, E>(&self, executor: E, account: &HrAccount) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE hr_accounts SET current_seat_count = $2 WHERE id = $1")
            .bind(account.id)
            .bind(account.current_seat_count)
            .execute(executor)
            .await?;
        Ok(())
    }
}
