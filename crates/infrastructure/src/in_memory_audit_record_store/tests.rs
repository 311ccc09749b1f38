use chrono::{DateTime, TimeZone, Utc};

use vigia_application::{AuditFilter, AuditRecordStore, NewAuditRecord};

use super::InMemoryAuditRecordStore;

fn instant(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn new_record(
    actor_id: Option<i64>,
    action: &str,
    entity_id: i64,
    recorded_at: DateTime<Utc>,
) -> NewAuditRecord {
    NewAuditRecord {
        actor_id,
        actor_name: actor_id.map(|id| format!("user-{id}")),
        action: action.to_owned(),
        entity_type: "POSITION".to_owned(),
        entity_id,
        before_state: None,
        after_state: None,
        recorded_at,
    }
}

#[tokio::test]
async fn empty_filter_returns_every_record() {
    let store = InMemoryAuditRecordStore::new();
    for id in 1..=3 {
        let appended = store
            .append(new_record(Some(1), "INSERT", id, instant(5, 10, 0)))
            .await;
        assert!(appended.is_ok());
    }

    let listed = store.query(AuditFilter::default()).await.unwrap_or_default();
    assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn filters_combine_conjunctively() {
    let store = InMemoryAuditRecordStore::new();
    let writes = [
        new_record(Some(1), "INSERT", 1, instant(5, 10, 0)),
        new_record(Some(1), "DELETE", 2, instant(5, 11, 0)),
        new_record(Some(2), "INSERT", 3, instant(5, 12, 0)),
    ];
    for record in writes {
        assert!(store.append(record).await.is_ok());
    }

    let filter = AuditFilter {
        actor_id: Some(1),
        action: Some("insert".to_owned()),
        ..AuditFilter::default()
    };
    let listed = store.query(filter).await.unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].entity_id, 1);
}

#[tokio::test]
async fn action_match_is_case_insensitive_substring() {
    let store = InMemoryAuditRecordStore::new();
    assert!(
        store
            .append(new_record(Some(1), "UPDATE", 1, instant(5, 10, 0)))
            .await
            .is_ok()
    );

    let filter = AuditFilter {
        action: Some("pda".to_owned()),
        ..AuditFilter::default()
    };
    let listed = store.query(filter).await.unwrap_or_default();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn date_bounds_are_inclusive_at_day_granularity() {
    let store = InMemoryAuditRecordStore::new();
    let late_in_day = Utc
        .with_ymd_and_hms(2024, 1, 5, 23, 59, 0)
        .single()
        .unwrap_or_default();
    assert!(
        store
            .append(new_record(Some(1), "INSERT", 1, late_in_day))
            .await
            .is_ok()
    );
    assert!(
        store
            .append(new_record(Some(1), "INSERT", 2, instant(6, 0, 1)))
            .await
            .is_ok()
    );

    let filter = AuditFilter::from_transport(None, None, Some("2024-01-05"), Some("2024-01-05"))
        .unwrap_or_default();
    let listed = store.query(filter).await.unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].entity_id, 1);
}

#[tokio::test]
async fn ordering_is_recency_first_with_id_tie_break() {
    let store = InMemoryAuditRecordStore::new();
    let shared_instant = instant(5, 12, 0);
    assert!(
        store
            .append(new_record(Some(1), "INSERT", 1, shared_instant))
            .await
            .is_ok()
    );
    assert!(
        store
            .append(new_record(Some(1), "UPDATE", 2, shared_instant))
            .await
            .is_ok()
    );
    assert!(
        store
            .append(new_record(Some(1), "DELETE", 3, instant(4, 12, 0)))
            .await
            .is_ok()
    );

    let listed = store.query(AuditFilter::default()).await.unwrap_or_default();
    let ids: Vec<i64> = listed.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[tokio::test]
async fn find_returns_the_stored_record() {
    let store = InMemoryAuditRecordStore::new();
    let appended = store
        .append(new_record(None, "INSERT", 9, instant(5, 10, 0)))
        .await;
    let id = appended.map(|record| record.id).unwrap_or_default();

    let found = store.find(id).await.unwrap_or_default();
    assert_eq!(found.map(|record| record.actor_id), Some(None));

    let missing = store.find(999).await.unwrap_or_default();
    assert!(missing.is_none());
}
