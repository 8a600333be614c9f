// src/models/allocation.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{affiliation::Affiliation, asset::Asset, assignment::Assignment};

// ---
// Outcome of one committed allocation
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub assignment: Assignment,
    pub affiliation: Affiliation,
    /// True when this allocation took a new seat.
    pub affiliation_created: bool,
    /// Asset state right after the decrement.
    pub asset: Asset,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReclaimFailure {
    pub assignment_id: Uuid,
    pub error: String,
}

// Affiliation removal never hides a partial reclaim.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemovalReport {
    pub affiliation: Affiliation,
    pub reclaimed: Vec<Uuid>,
    pub failed: Vec<ReclaimFailure>,
}

impl RemovalReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
