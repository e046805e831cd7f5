mod common;

use shortlink::application::services::ShortenerService;
use shortlink::domain::errors::ShortenError;
use shortlink::infrastructure::persistence::InMemoryShortUrlRepository;
use shortlink::utils::code_generator::RandomCodeGenerator;
use std::collections::HashSet;
use std::sync::Arc;

fn engine() -> (Arc<ShortenerService>, Arc<InMemoryShortUrlRepository>) {
    let repo = Arc::new(InMemoryShortUrlRepository::new());
    let service = ShortenerService::new(
        repo.clone(),
        Arc::new(RandomCodeGenerator::new()),
        common::settings(),
    );
    (Arc::new(service), repo)
}

#[tokio::test]
async fn test_allocate_resolve_and_reallocate() {
    let (engine, repo) = engine();

    let first = engine.allocate("https://example.com/a", None).await.unwrap();
    assert_eq!(first.code.len(), 6);
    assert!(first.code.chars().all(|c| c.is_ascii_alphanumeric()));

    let target = engine.resolve(&first.code).await.unwrap();
    assert_eq!(target, "https://example.com/a");

    let again = engine.allocate("https://example.com/a", None).await.unwrap();
    assert_eq!(again, first);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_short_custom_code_rejected_without_writes() {
    let (engine, repo) = engine();

    let result = engine.allocate("https://example.com/b", Some("ab")).await;

    assert!(matches!(
        result,
        Err(ShortenError::InvalidCustomCode { ref code, .. }) if code == "ab"
    ));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_custom_code_owned_by_other_target() {
    let (engine, repo) = engine();
    engine
        .allocate("https://example.com/original", Some("custom1"))
        .await
        .unwrap();

    let result = engine
        .allocate("https://example.com/c", Some("custom1"))
        .await;

    assert!(matches!(result, Err(ShortenError::CodeInUse(ref code)) if code == "custom1"));
    assert_eq!(repo.len(), 1);
    assert_eq!(
        engine.resolve("custom1").await.unwrap(),
        "https://example.com/original"
    );
}

#[tokio::test]
async fn test_custom_code_boundaries() {
    let (engine, _repo) = engine();

    for bad in ["abc", "abcdefghijklmnopq", "my-link", "with space", "ünïcode1"] {
        let result = engine.allocate("https://example.com/x", Some(bad)).await;
        assert!(
            matches!(result, Err(ShortenError::InvalidCustomCode { .. })),
            "{bad} should be rejected"
        );
    }

    engine
        .allocate("https://example.com/four", Some("abcd"))
        .await
        .unwrap();
    engine
        .allocate("https://example.com/sixteen", Some("abcdefghijklmnop"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dedup_wins_over_later_custom_code() {
    let (engine, _repo) = engine();

    let first = engine.allocate("https://example.com/d", None).await.unwrap();
    let second = engine
        .allocate("https://example.com/d", Some("wanted1"))
        .await
        .unwrap();

    assert_eq!(second.code, first.code);
    assert!(matches!(
        engine.resolve("wanted1").await,
        Err(ShortenError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_targets_are_stored_byte_exact() {
    let (engine, repo) = engine();

    let a = engine.allocate("https://example.com/Path", None).await.unwrap();
    let b = engine.allocate("https://example.com/path", None).await.unwrap();
    let c = engine.allocate("https://example.com/path/", None).await.unwrap();

    assert_ne!(a.code, b.code);
    assert_ne!(b.code, c.code);
    assert_eq!(repo.len(), 3);
    assert_eq!(engine.resolve(&c.code).await.unwrap(), "https://example.com/path/");
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let (engine, _repo) = engine();

    assert!(matches!(
        engine.resolve("nope12").await,
        Err(ShortenError::NotFound(ref code)) if code == "nope12"
    ));
    assert!(matches!(
        engine.resolve("").await,
        Err(ShortenError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_many_allocations_yield_unique_codes() {
    let (engine, repo) = engine();
    let mut codes = HashSet::new();

    for i in 0..500 {
        let record = engine
            .allocate(&format!("https://example.com/{i}"), None)
            .await
            .unwrap();
        assert!(codes.insert(record.code));
    }

    assert_eq!(repo.len(), 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_for_same_target_agree() {
    let (engine, repo) = engine();
    let mut handles = vec![];

    for _ in 0..32 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine.allocate("https://example.com/hot", None).await
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        codes.insert(handle.await.unwrap().unwrap().code);
    }

    assert_eq!(codes.len(), 1);
    assert_eq!(repo.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_custom_code_has_single_winner() {
    let (engine, repo) = engine();
    let mut handles = vec![];

    for i in 0..16 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .allocate(&format!("https://example.com/race/{i}"), Some("race01"))
                .await
        }));
    }

    let mut won = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(record) => {
                assert_eq!(record.code, "race01");
                won += 1;
            }
            Err(ShortenError::CodeInUse(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(won, 1);
    assert_eq!(repo.len(), 1);
}
