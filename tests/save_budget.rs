mod common;

use std::sync::Arc;

use budget_engine::{
    core::FixedClock,
    domain::{CategoryLimit, PeriodKey, PeriodKind},
    storage::{BudgetStore, MemoryStore},
    BudgetError, BudgetOverviewService, SaveBudgetRequest,
};
use common::{at, Harness};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
async fn second_save_replaces_amount_and_categories() {
    let harness = Harness::new(at(2024, 6, 15)).await;
    let first = harness
        .service
        .save_budget(
            harness.user,
            SaveBudgetRequest::new(PeriodKind::Monthly, "1000")
                .with_limit("Food", "400")
                .with_limit("Fuel", "150"),
        )
        .await
        .expect("first save");
    let second = harness
        .service
        .save_budget(
            harness.user,
            SaveBudgetRequest::new(PeriodKind::Monthly, "1500").with_limit("Books", "60"),
        )
        .await
        .expect("second save");

    assert_eq!(first.id, second.id);
    assert_eq!(second.period, PeriodKey::monthly(2024, 6));

    let overview = harness
        .service
        .get_overview(harness.user, PeriodKind::Monthly)
        .await
        .unwrap();
    assert_eq!(overview.budget_amount, Some(dec!(1500)));
    let names: Vec<_> = overview.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Books"]);
}

#[tokio::test]
async fn invalid_entries_are_dropped_not_fatal() {
    let harness = Harness::new(at(2024, 6, 15)).await;
    let budget = harness
        .service
        .save_budget(
            harness.user,
            SaveBudgetRequest::new(PeriodKind::Monthly, "800")
                .with_limit("  Groceries ", "250.75")
                .with_limit("   ", "100")
                .with_limit("Coffee", "0")
                .with_limit("Parking", "twelve"),
        )
        .await
        .expect("save with partial limits");
    assert_eq!(budget.total_amount, dec!(800));
    assert_eq!(
        budget.category_limits,
        vec![CategoryLimit::new("Groceries", dec!(250.75))]
    );
}

#[tokio::test]
async fn invalid_total_fails_before_any_write() {
    let harness = Harness::new(at(2024, 6, 15)).await;
    for raw in ["", "0", "-100", "lots"] {
        let err = harness
            .service
            .save_budget(
                harness.user,
                SaveBudgetRequest::new(PeriodKind::Monthly, raw).with_limit("Food", "50"),
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, BudgetError::InvalidAmount { ref field, .. } if field == "amount"),
            "unexpected error for {raw:?}: {err}"
        );
    }
    assert!(harness.store.budgets_for(harness.user).await.is_empty());
}

#[tokio::test]
async fn unknown_user_cannot_save() {
    let harness = Harness::new(at(2024, 6, 15)).await;
    let ghost = Uuid::new_v4();
    let err = harness
        .service
        .save_budget(ghost, SaveBudgetRequest::new(PeriodKind::Yearly, "100"))
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::UserNotFound(id) if id == ghost));
    assert!(err.is_rejection());
}

#[tokio::test]
async fn explicit_period_must_match_kind() {
    let harness = Harness::new(at(2024, 6, 15)).await;
    let err = harness
        .service
        .save_budget(
            harness.user,
            SaveBudgetRequest::new(PeriodKind::Monthly, "100").for_period(PeriodKey::yearly(2024)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::InvalidPeriod(_)));

    let err = harness
        .service
        .save_budget(
            harness.user,
            SaveBudgetRequest::new(PeriodKind::Monthly, "100")
                .for_period(PeriodKey::monthly(2024, 13)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::InvalidPeriod(_)));
}

#[tokio::test]
async fn explicit_period_targets_future_month() {
    let harness = Harness::new(at(2024, 6, 15)).await;
    let budget = harness
        .service
        .save_budget(
            harness.user,
            SaveBudgetRequest::new(PeriodKind::Monthly, "2000")
                .for_period(PeriodKey::monthly(2024, 8)),
        )
        .await
        .unwrap();
    assert_eq!(budget.period, PeriodKey::monthly(2024, 8));

    let june = harness
        .service
        .get_overview(harness.user, PeriodKind::Monthly)
        .await
        .unwrap();
    assert_eq!(june.budget_amount, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_never_expose_mixed_state() {
    let store = Arc::new(MemoryStore::new());
    let user = Uuid::new_v4();
    store.add_user(user).await;
    let service = Arc::new(
        BudgetOverviewService::new(store.clone())
            .with_clock(Arc::new(FixedClock(at(2024, 6, 15)))),
    );

    let mut writers = Vec::new();
    for idx in 1..=20u32 {
        let service = service.clone();
        writers.push(tokio::spawn(async move {
            let request = SaveBudgetRequest::new(PeriodKind::Monthly, (idx * 100).to_string())
                .with_limit(format!("Cat{idx}"), idx.to_string());
            service.save_budget(user, request).await
        }));
    }

    let reader = {
        let service = service.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                let overview = service
                    .get_overview(user, PeriodKind::Monthly)
                    .await
                    .expect("overview during writes");
                if let Some(total) = overview.budget_amount {
                    let idx = (total / dec!(100)).normalize();
                    assert_eq!(overview.categories.len(), 1);
                    assert_eq!(overview.categories[0].category, format!("Cat{idx}"));
                    assert_eq!(overview.categories[0].budget_amount, Some(idx));
                }
                tokio::task::yield_now().await;
            }
        })
    };

    for writer in writers {
        writer.await.expect("join writer").expect("save succeeds");
    }
    reader.await.expect("reader saw consistent budgets");

    let budgets = store.budgets_for(user).await;
    assert_eq!(budgets.len(), 1);
    let stored = store
        .find_budget(user, &PeriodKey::monthly(2024, 6))
        .await
        .unwrap()
        .expect("budget exists");
    let idx = (stored.total_amount / dec!(100)).normalize();
    assert_eq!(stored.category_limits.len(), 1);
    assert_eq!(stored.category_limits[0].amount, idx);
    assert!(stored.total_amount > Decimal::ZERO);
}
