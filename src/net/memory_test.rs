use super::*;
use crate::net::types::OverlayKind;

fn text_fields(content: &str) -> OverlayFields {
    OverlayFields { content: content.to_owned(), ..OverlayFields::default() }
}

#[tokio::test]
async fn create_assigns_unique_ids_in_order() {
    let repo = MemoryOverlayRepository::new();
    let a = repo.create(&text_fields("a")).await.unwrap();
    let b = repo.create(&text_fields("b")).await.unwrap();
    assert_ne!(a.id, b.id);

    let listed = repo.list().await.unwrap();
    let contents: Vec<&str> = listed.iter().map(|o| o.content.as_str()).collect();
    assert_eq!(contents, ["a", "b"]);
}

#[tokio::test]
async fn update_applies_patch_and_returns_row() {
    let repo = MemoryOverlayRepository::new();
    let created = repo.create(&text_fields("LIVE")).await.unwrap();
    let updated = repo.update(&created.id, &OverlayPatch::position(120, 70)).await.unwrap();
    assert_eq!((updated.position_x, updated.position_y), (120, 70));
    assert_eq!(updated.content, "LIVE");
    assert_eq!(repo.get(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn update_unknown_id_is_rejected() {
    let repo = MemoryOverlayRepository::new();
    let err = repo.update(&OverlayId::new("missing"), &OverlayPatch::position(0, 0)).await.unwrap_err();
    assert!(err.is_protocol());
    assert_eq!(err.to_string(), NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_exactly_one() {
    let repo = MemoryOverlayRepository::new();
    let a = repo.create(&text_fields("a")).await.unwrap();
    repo.create(&text_fields("b")).await.unwrap();

    let ack = repo.delete(&a.id).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some(DELETED));

    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content, "b");
}

#[tokio::test]
async fn delete_unknown_id_is_rejected() {
    let repo = MemoryOverlayRepository::new();
    let err = repo.delete(&OverlayId::new("missing")).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { .. }));
}

#[tokio::test]
async fn fail_next_applies_once() {
    let repo = MemoryOverlayRepository::new();
    repo.fail_next("db down").await;
    let err = repo.list().await.unwrap_err();
    assert_eq!(err.to_string(), "db down");
    assert!(repo.list().await.is_ok());
}

#[tokio::test]
async fn calls_are_counted_per_operation() {
    let repo = MemoryOverlayRepository::new();
    let created = repo.create(&OverlayFields { kind: OverlayKind::Image, ..text_fields("x") }).await.unwrap();
    repo.list().await.unwrap();
    repo.update(&created.id, &OverlayPatch::default()).await.unwrap();
    repo.delete(&created.id).await.unwrap();

    let calls = repo.calls().await;
    assert_eq!(calls, CallCounts { list: 1, get: 0, create: 1, update: 1, delete: 1 });
    assert_eq!(calls.total(), 4);
    assert_eq!(calls.mutations(), 3);
}

#[tokio::test]
async fn seeded_overlays_are_listed_in_order_and_snapshot_is_uncounted() {
    let seed = vec![
        Overlay::from_fields(OverlayId::new("x"), text_fields("first")),
        Overlay::from_fields(OverlayId::new("y"), text_fields("second")),
    ];
    let repo = MemoryOverlayRepository::with_overlays(seed.clone());

    assert_eq!(repo.snapshot().await, seed);
    assert_eq!(repo.calls().await.total(), 0);

    repo.delete(&OverlayId::new("x")).await.unwrap();
    assert_eq!(repo.snapshot().await, seed[1..].to_vec());
    assert_eq!(repo.list().await.unwrap(), repo.snapshot().await);
}
