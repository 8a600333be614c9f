// src/db/postgres.rs

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::Config,
    db::{
        store::{Store, UnitOfWork},
        AccountRepository, AffiliationRepository, AssetRepository, AssignmentRepository,
        RequestRepository,
    },
    models::{
        affiliation::{Affiliation, HrAccount},
        asset::Asset,
        assignment::Assignment,
        request::AssetRequest,
    },
};

#[derive(Clone, Default)]
struct Repositories {
    assets: AssetRepository,
    accounts: AccountRepository,
    affiliations: AffiliationRepository,
    requests: RequestRepository,
    assignments: AssignmentRepository,
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    repos: Repositories,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repos: Repositories::default(),
        }
    }

    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Database connection established");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
    repos: Repositories,
}

#[async_trait]
impl Store for PgStore {
    type Tx = PgUnitOfWork;

    async fn begin(&self) -> Result<PgUnitOfWork, AppError> {
        let tx = self.pool.begin().await?;
        Ok(PgUnitOfWork {
            tx,
            repos: self.repos.clone(),
        })
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    // --- Inventory ---

    async fn insert_asset(&mut self, asset: &Asset) -> Result<(), AppError> {
        self.repos.assets.insert(&mut *self.tx, asset).await
    }

    async fn find_asset(&mut self, asset_id: Uuid) -> Result<Option<Asset>, AppError> {
        self.repos.assets.find(&mut *self.tx, asset_id).await
    }

    async fn find_asset_for_update(&mut self, asset_id: Uuid) -> Result<Option<Asset>, AppError> {
        self.repos.assets.find_for_update(&mut *self.tx, asset_id).await
    }

    async fn list_assets_by_owner(&mut self, owner_hr_id: Uuid) -> Result<Vec<Asset>, AppError> {
        self.repos.assets.list_by_owner(&mut *self.tx, owner_hr_id).await
    }

    async fn update_asset_quantities(&mut self, asset: &Asset) -> Result<(), AppError> {
        self.repos.assets.update_quantities(&mut *self.tx, asset).await
    }

    async fn delete_asset(&mut self, asset_id: Uuid) -> Result<bool, AppError> {
        self.repos.assets.delete(&mut *self.tx, asset_id).await
    }

    // --- HR accounts ---

    async fn find_account(&mut self, hr_id: Uuid) -> Result<Option<HrAccount>, AppError> {
        self.repos.accounts.find(&mut *self.tx, hr_id).await
    }

    async fn find_account_for_update(&mut self, hr_id: Uuid) -> Result<Option<HrAccount>, AppError> {
        self.repos.accounts.find_for_update(&mut *self.tx, hr_id).await
    }

    async fn update_seat_count(&mut self, account: &HrAccount) -> Result<(), AppError> {
        self.repos.accounts.update_seat_count(&mut *self.tx, account).await
    }

    // --- Affiliations ---

    async fn find_affiliation(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError> {
        self.repos.affiliations.find(&mut *self.tx, employee_id, owner_hr_id).await
    }

    async fn find_affiliation_for_update(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Option<Affiliation>, AppError> {
        self.repos
            .affiliations
            .find_for_update(&mut *self.tx, employee_id, owner_hr_id)
            .await
    }

    async fn insert_affiliation(&mut self, affiliation: &Affiliation) -> Result<(), AppError> {
        self.repos.affiliations.insert(&mut *self.tx, affiliation).await
    }

    async fn delete_affiliation(&mut self, employee_id: Uuid, owner_hr_id: Uuid) -> Result<bool, AppError> {
        self.repos.affiliations.delete(&mut *self.tx, employee_id, owner_hr_id).await
    }

    async fn list_affiliations_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Affiliation>, AppError> {
        self.repos.affiliations.list_by_employee(&mut *self.tx, employee_id).await
    }

    async fn list_affiliations_by_owner(&mut self, owner_hr_id: Uuid) -> Result<Vec<Affiliation>, AppError> {
        self.repos.affiliations.list_by_owner(&mut *self.tx, owner_hr_id).await
    }

    // --- Requests ---

    async fn insert_request(&mut self, request: &AssetRequest) -> Result<(), AppError> {
        self.repos.requests.insert(&mut *self.tx, request).await
    }

    async fn find_request(&mut self, request_id: Uuid) -> Result<Option<AssetRequest>, AppError> {
        self.repos.requests.find(&mut *self.tx, request_id).await
    }

    async fn find_request_for_update(&mut self, request_id: Uuid) -> Result<Option<AssetRequest>, AppError> {
        self.repos.requests.find_for_update(&mut *self.tx, request_id).await
    }

    async fn update_request_decision(&mut self, request: &AssetRequest) -> Result<(), AppError> {
        self.repos.requests.update_decision(&mut *self.tx, request).await
    }

    // --- Assignments ---

    async fn insert_assignment(&mut self, assignment: &Assignment) -> Result<(), AppError> {
        self.repos.assignments.insert(&mut *self.tx, assignment).await
    }

    async fn find_assignment(&mut self, assignment_id: Uuid) -> Result<Option<Assignment>, AppError> {
        self.repos.assignments.find(&mut *self.tx, assignment_id).await
    }

    async fn find_assignment_for_update(&mut self, assignment_id: Uuid) -> Result<Option<Assignment>, AppError> {
        self.repos.assignments.find_for_update(&mut *self.tx, assignment_id).await
    }

    async fn update_assignment_status(&mut self, assignment: &Assignment) -> Result<(), AppError> {
        self.repos.assignments.update_status(&mut *self.tx, assignment).await
    }

    async fn list_assignments_by_employee(&mut self, employee_id: Uuid) -> Result<Vec<Assignment>, AppError> {
        self.repos.assignments.list_by_employee(&mut *self.tx, employee_id).await
    }

    async fn list_outstanding_assignments(
        &mut self,
        employee_id: Uuid,
        owner_hr_id: Uuid,
    ) -> Result<Vec<Assignment>, AppError> {
        self.repos
            .assignments
            .list_outstanding(&mut *self.tx, employee_id, owner_hr_id)
            .await
    }

    async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}
