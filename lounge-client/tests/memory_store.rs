// lounge-client/tests/memory_store.rs
// In-memory store behaviour

use lounge_client::{ClientError, MemoryStore, Query, RecordStore, SortDirection, Table};
use serde_json::json;

#[tokio::test]
async fn test_insert_then_select() {
    let store = MemoryStore::new();
    store
        .insert(Table::Products, json!({"id": "prod-1", "name": "Rikiskebab"}))
        .await
        .unwrap();

    let records = store.select(Table::Products, &Query::all()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Rikiskebab");
    // created_at is stamped on insert
    assert!(records[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_duplicate_insert_rejected() {
    let store = MemoryStore::new().with_records(Table::Users, [json!({"id": "user-1"})]);
    let err = store
        .insert(Table::Users, json!({"id": "user-1"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(store.len(Table::Users), 1);
}

#[tokio::test]
async fn test_order_by_descending_with_ties_newest_first() {
    let store = MemoryStore::new().with_records(
        Table::Orders,
        [
            json!({"id": "order-a", "created_at": "2024-05-01T10:00:00Z"}),
            json!({"id": "order-b", "created_at": "2024-05-03T10:00:00Z"}),
            json!({"id": "order-c", "created_at": "2024-05-01T10:00:00Z"}),
        ],
    );

    let query = Query::all().order_by("created_at", SortDirection::Descending);
    let ids: Vec<String> = store
        .select(Table::Orders, &query)
        .await
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["order-b", "order-c", "order-a"]);
}

#[tokio::test]
async fn test_ilike_and_eq_with_limit() {
    let store = MemoryStore::new().with_records(
        Table::Users,
        [
            json!({"id": "user-1", "fullName": "Alex Doe", "password": "1234"}),
            json!({"id": "user-2", "fullName": "alex doe", "password": "1234"}),
            json!({"id": "user-3", "fullName": "Alex Doe", "password": "9999"}),
        ],
    );

    let query = Query::all()
        .ilike("fullName", "ALEX DOE")
        .eq("password", "1234");
    assert_eq!(store.select(Table::Users, &query).await.unwrap().len(), 2);

    let limited = store.select(Table::Users, &query.limit(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0]["id"], "user-1");
}

#[tokio::test]
async fn test_update_merges_fields() {
    let store = MemoryStore::new().with_records(
        Table::Users,
        [json!({"id": "user-1", "fullName": "Alex", "totalSpent": 100.0})],
    );
    store
        .update(Table::Users, "user-1", json!({"totalSpent": 700.0}))
        .await
        .unwrap();

    let user = store.get(Table::Users, "user-1").unwrap();
    assert_eq!(user["fullName"], "Alex");
    assert_eq!(user["totalSpent"], 700.0);

    let err = store
        .update(Table::Users, "user-404", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn test_upsert_inserts_then_merges() {
    let store = MemoryStore::new();
    store
        .upsert(
            Table::DashboardConfig,
            json!({"id": "main", "config": {"welcomeTitle": "Hola"}}),
        )
        .await
        .unwrap();
    store
        .upsert(
            Table::DashboardConfig,
            json!({"id": "main", "config": {"welcomeTitle": "Bienvenido"}}),
        )
        .await
        .unwrap();

    assert_eq!(store.len(Table::DashboardConfig), 1);
    let record = store.get(Table::DashboardConfig, "main").unwrap();
    assert_eq!(record["config"]["welcomeTitle"], "Bienvenido");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = MemoryStore::new().with_records(Table::Promotions, [json!({"id": "promo-1"})]);
    store.delete(Table::Promotions, "promo-1").await.unwrap();
    store.delete(Table::Promotions, "promo-1").await.unwrap();
    assert!(store.is_empty(Table::Promotions));
}

#[tokio::test]
async fn test_fault_injection_per_table() {
    let store = MemoryStore::new();
    store.fail_writes(Table::Orders, true);
    store.fail_reads(Table::Products, true);

    let err = store
        .insert(Table::Orders, json!({"id": "order-1"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unavailable(_)));
    assert!(store.is_empty(Table::Orders));
    assert!(store.select(Table::Products, &Query::all()).await.is_err());

    // other tables unaffected
    store
        .insert(Table::Users, json!({"id": "user-1"}))
        .await
        .unwrap();

    store.fail_writes(Table::Orders, false);
    store
        .insert(Table::Orders, json!({"id": "order-1"}))
        .await
        .unwrap();
    assert_eq!(store.len(Table::Orders), 1);
}
