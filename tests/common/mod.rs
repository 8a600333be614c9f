#![allow(dead_code)]

use asset_allocation::{
    common::retry::RetryPolicy,
    config::AppState,
    db::MemoryStore,
    models::{
        affiliation::HrAccount,
        asset::{Asset, AssetType},
        auth::Caller,
        request::AssetRequest,
    },
};
use std::time::Duration;
use uuid::Uuid;

pub struct Company {
    pub store: MemoryStore,
    pub state: AppState<MemoryStore>,
    pub hr: Caller,
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

/// One HR account with `seat_limit` seats, `seats_used` of them already taken.
pub async fn company(seat_limit: i32, seats_used: i32) -> Company {
    let store = MemoryStore::new();
    let hr = Caller::hr(Uuid::new_v4(), "hr@acme.test");

    let mut account = HrAccount::new(hr.id, Some("Acme".into()), seat_limit);
    account.current_seat_count = seats_used;
    store.seed_account(account).await;

    let state = AppState::new(store.clone(), fast_retry());
    Company { store, state, hr }
}

pub fn employee() -> Caller {
    let id = Uuid::new_v4();
    Caller::employee(id, format!("{id}@acme.test"))
}

impl Company {
    pub async fn stock(&self, name: &str, asset_type: AssetType, quantity: i32) -> Asset {
        self.state
            .inventory
            .register(&self.hr, name, asset_type, quantity)
            .await
            .unwrap()
    }

    pub async fn request(&self, employee: &Caller, asset: &Asset) -> AssetRequest {
        self.state
            .requests
            .create(employee, asset.id, None)
            .await
            .unwrap()
    }

    pub async fn seats(&self) -> i32 {
        self.store.account(self.hr.id).await.unwrap().current_seat_count
    }

    pub async fn available(&self, asset: &Asset) -> i32 {
        self.store.asset(asset.id).await.unwrap().available_quantity
    }
}
