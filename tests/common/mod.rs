#![allow(dead_code)]

use std::sync::Arc;

use budget_engine::{
    core::FixedClock, storage::MemoryStore, BudgetOverviewService, SaveBudgetRequest,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A store with one registered user and a service pinned to `now`.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub service: BudgetOverviewService,
    pub user: Uuid,
    pub now: DateTime<Utc>,
}

impl Harness {
    pub async fn new(now: DateTime<Utc>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let user = Uuid::new_v4();
        store.add_user(user).await;
        let service =
            BudgetOverviewService::new(store.clone()).with_clock(Arc::new(FixedClock(now)));
        Self {
            store,
            service,
            user,
            now,
        }
    }

    pub async fn spend(&self, category: Option<&str>, amount: Decimal, date: DateTime<Utc>) {
        self.store
            .record_expense(self.user, category, amount, date)
            .await
            .expect("record expense");
    }

    pub async fn save(&self, request: SaveBudgetRequest) {
        self.service
            .save_budget(self.user, request)
            .await
            .expect("save budget");
    }
}

/// Noon UTC on the given day.
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}
