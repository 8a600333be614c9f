// src/services/affiliation_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Store, UnitOfWork},
    models::affiliation::Affiliation,
};

// Read side of the registry. Creation and removal go through the
// allocation coordinator, which also owns the seat counts.
#[derive(Clone)]
pub struct AffiliationRegistry<S: Store> {
    store: S,
}

impl<S: Store> AffiliationRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn find(&self, employee_id: Uuid, owner_hr_id: Uuid) -> Result<Option<Affiliation>, AppError> {
        let mut tx = self.store.begin().await?;
        tx.find_affiliation(employee_id, owner_hr_id).await
    }

    pub async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<Affiliation>, AppError> {
        let mut tx = self.store.begin().await?;
        tx.list_affiliations_by_employee(employee_id).await
    }

    pub async fn list_by_owner(&self, owner_hr_id: Uuid) -> Result<Vec<Affiliation>, AppError> {
        let mut tx = self.store.begin().await?;
        tx.list_affiliations_by_owner(owner_hr_id).await
    }
}
