//! Handle registry lifecycle.

use std::sync::Arc;
use vidgen::{HANDLE_URL_PREFIX, HandleRegistry};

#[test]
fn test_handles_are_unique_urls() {
    let registry = HandleRegistry::new();
    let a = registry.acquire(Arc::from(vec![1u8]));
    let b = registry.acquire(Arc::from(vec![1u8]));

    assert_ne!(a, b);
    assert_ne!(a.url(), b.url());
    assert!(a.url().starts_with(HANDLE_URL_PREFIX));
    assert_eq!(a.url(), format!("blob:vidgen/{}", a.id()));
    assert_eq!(registry.outstanding(), 2);
}

#[test]
fn test_release_is_idempotent() {
    let registry = HandleRegistry::new();
    let handle = registry.acquire(Arc::from(vec![7u8; 16]));

    assert!(registry.release(&handle));
    assert!(!registry.release(&handle));
    assert_eq!(registry.acquired_total(), 1);
    assert_eq!(registry.released_total(), 1);
    assert_eq!(registry.outstanding(), 0);
}

#[test]
fn test_release_all_counts() {
    let registry = HandleRegistry::new();
    let kept = registry.clone();
    for n in 0..4u8 {
        registry.acquire(Arc::from(vec![n]));
    }
    let first = registry.acquire(Arc::from(vec![9u8]));
    registry.release(&first);

    assert_eq!(kept.release_all(), 4);
    assert_eq!(kept.release_all(), 0);
    assert_eq!(registry.acquired_total(), 5);
    assert_eq!(registry.released_total(), 5);
}

#[test]
fn test_resolve_shares_payload() {
    let registry = HandleRegistry::new();
    let payload: Arc<[u8]> = Arc::from(vec![1u8, 2, 3]);
    let handle = registry.acquire(Arc::clone(&payload));

    let resolved = registry.resolve(&handle).unwrap();
    assert!(Arc::ptr_eq(&resolved, &payload));
}
