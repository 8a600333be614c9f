// src/config.rs

use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

use crate::{
    common::retry::RetryPolicy,
    db::Store,
    services::{
        affiliation_service::AffiliationRegistry, allocation_service::AllocationCoordinator,
        assignment_service::AssignmentLedger, inventory_service::InventoryLedger,
        request_service::RequestWorkflow,
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = env_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let max_connections = env_or("DB_MAX_CONNECTIONS", 5u32)?;
        let acquire_timeout_secs = env_or("DB_ACQUIRE_TIMEOUT_SECS", 3u64)?;
        let retry_attempts = env_or("ALLOCATION_RETRY_ATTEMPTS", 3u32)?;
        let retry_base_ms = env_or("ALLOCATION_RETRY_BASE_MS", 50u64)?;

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            retry: RetryPolicy::new(retry_attempts, Duration::from_millis(retry_base_ms)),
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

// ---
// Shared state handed to every handler
// ---
#[derive(Clone)]
pub struct AppState<S: Store> {
    pub inventory: InventoryLedger<S>,
    pub requests: RequestWorkflow<S>,
    pub coordinator: AllocationCoordinator<S>,
    pub affiliations: AffiliationRegistry<S>,
    pub assignments: AssignmentLedger<S>,
    pub retry: RetryPolicy,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S, retry: RetryPolicy) -> Self {
        // --- Dependency graph ---
        let coordinator = AllocationCoordinator::new(store.clone());
        let requests = RequestWorkflow::new(store.clone(), coordinator.clone());

        Self {
            inventory: InventoryLedger::new(store.clone()),
            requests,
            coordinator,
            affiliations: AffiliationRegistry::new(store.clone()),
            assignments: AssignmentLedger::new(store),
            retry,
        }
    }
}
