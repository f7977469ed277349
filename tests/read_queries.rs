//! Read-side query contracts: newest-first ordering, the N/A sentinel,
//! max-id latest selection and cascade deletes.

mod common;

use common::{seed_employee, test_pool};
use xpayroll::db;
use xpayroll::db::transactions::{STATUS_FAILURE, STATUS_SUCCESS};

#[tokio::test]
async fn list_all_is_newest_first_for_any_insertion_order() {
    let pool = test_pool().await;
    let (_, employee_id) = seed_employee(&pool, "carol", Some("rEMPLOYEE123")).await;

    // Insert with submission times deliberately out of order
    for created_at in [3_000, 1_000, 5_000, 2_000, 4_000] {
        db::transactions::insert(
            &pool,
            Some(employee_id),
            100.0,
            "rEMPLOYEE123",
            STATUS_SUCCESS,
            Some("HASH"),
            created_at,
        )
        .await
        .unwrap();
    }

    let rows = db::transactions::list_all(&pool).await.unwrap();
    assert_eq!(rows.len(), 5);
    for pair in rows.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "history must be newest first"
        );
    }
    assert_eq!(rows[0].created_at, 5_000);
    assert_eq!(rows[0].employee_name.as_deref(), Some("carol"));
}

#[tokio::test]
async fn employee_without_history_reports_na() {
    let pool = test_pool().await;
    seed_employee(&pool, "fresh", None).await;

    let rows = db::employees::list_with_latest_status(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].latest_status, "N/A");
    assert_eq!(rows[0].latest_date, None);
}

#[tokio::test]
async fn latest_status_is_the_max_id_row() {
    let pool = test_pool().await;
    let (_, employee_id) = seed_employee(&pool, "carol", Some("rEMPLOYEE123")).await;

    // Same submission time: the row with the highest id wins
    for (status, created_at) in [
        (STATUS_SUCCESS, 1_000),
        (STATUS_SUCCESS, 2_000),
        (STATUS_FAILURE, 2_000),
    ] {
        db::transactions::insert(
            &pool,
            Some(employee_id),
            100.0,
            "rEMPLOYEE123",
            status,
            None,
            created_at,
        )
        .await
        .unwrap();
    }

    let rows = db::employees::list_with_latest_status(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].latest_status, STATUS_FAILURE);
    assert_eq!(rows[0].latest_date, Some(2_000));
}

#[tokio::test]
async fn latest_for_employee_picks_newest_or_nothing() {
    let pool = test_pool().await;
    let (_, with_history) = seed_employee(&pool, "carol", Some("rEMPLOYEE123")).await;
    let (_, without_history) = seed_employee(&pool, "dave", None).await;

    db::transactions::insert(&pool, Some(with_history), 10.0, "rEMPLOYEE123", STATUS_SUCCESS, Some("OLD"), 1_000)
        .await
        .unwrap();
    db::transactions::insert(&pool, Some(with_history), 20.0, "rEMPLOYEE123", STATUS_SUCCESS, Some("NEW"), 9_000)
        .await
        .unwrap();

    let latest = db::transactions::latest_for_employee(&pool, with_history)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.tx_id.as_deref(), Some("NEW"));
    assert_eq!(latest.amount, 20.0);

    assert!(
        db::transactions::latest_for_employee(&pool, without_history)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn per_employee_history_is_newest_first() {
    let pool = test_pool().await;
    let (_, employee_id) = seed_employee(&pool, "carol", Some("rEMPLOYEE123")).await;
    let (_, other_id) = seed_employee(&pool, "dave", Some("rOTHER456")).await;

    for created_at in [2_000, 1_000, 3_000] {
        db::transactions::insert(
            &pool,
            Some(employee_id),
            50.0,
            "rEMPLOYEE123",
            STATUS_SUCCESS,
            None,
            created_at,
        )
        .await
        .unwrap();
    }
    db::transactions::insert(&pool, Some(other_id), 99.0, "rOTHER456", STATUS_SUCCESS, None, 9_000)
        .await
        .unwrap();

    let history = db::transactions::list_for_employee(&pool, employee_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].created_at, 3_000);
    assert_eq!(history[2].created_at, 1_000);
}

#[tokio::test]
async fn deleting_a_user_cascades_to_employee_and_history() {
    let pool = test_pool().await;
    let (user_id, employee_id) = seed_employee(&pool, "carol", Some("rEMPLOYEE123")).await;
    db::transactions::insert(&pool, Some(employee_id), 10.0, "rEMPLOYEE123", STATUS_SUCCESS, None, 1_000)
        .await
        .unwrap();

    assert_eq!(db::users::delete(&pool, user_id).await.unwrap(), 1);

    assert!(db::employees::find_by_id(&pool, employee_id).await.unwrap().is_none());
    assert_eq!(db::transactions::count(&pool).await.unwrap(), 0);
}
