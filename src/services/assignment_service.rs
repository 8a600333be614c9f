// src/services/assignment_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Store, UnitOfWork},
    models::{assignment::Assignment, auth::Caller},
};

#[derive(Clone)]
pub struct AssignmentLedger<S: Store> {
    store: S,
}

impl<S: Store> AssignmentLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Newest first.
    pub async fn list_for_employee(&self, caller: &Caller) -> Result<Vec<Assignment>, AppError> {
        let mut tx = self.store.begin().await?;
        tx.list_assignments_by_employee(caller.id).await
    }

    pub async fn get(&self, caller: &Caller, assignment_id: Uuid) -> Result<Assignment, AppError> {
        let mut tx = self.store.begin().await?;
        let assignment = tx
            .find_assignment(assignment_id)
            .await?
            .ok_or(AppError::NotFound("Assignment"))?;

        if assignment.employee_id != caller.id && assignment.owner_hr_id != caller.id {
            return Err(AppError::Forbidden("assignment belongs to someone else"));
        }
        Ok(assignment)
    }
}
