use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::error::Error;
use crate::exporter::pagination::Paginator;
use crate::exporter::test_helpers::{MockStore, item};

#[tokio::test]
async fn test_single_page_terminates_after_one_call() {
    let store = Arc::new(MockStore::with_pages(vec![vec![
        item("a", "a.txt", "text/plain"),
        item("b", "b.txt", "text/plain"),
    ]]));
    let mut paginator = Paginator::new(store.clone(), 1000);

    let page = paginator.next_page().await.unwrap();
    assert_eq!(page.unwrap().len(), 2);

    assert!(paginator.next_page().await.unwrap().is_none());
    assert_eq!(store.page_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_three_pages_mean_exactly_three_calls() {
    let store = Arc::new(MockStore::with_pages(vec![
        vec![item("a", "a", "text/plain")],
        vec![item("b", "b", "text/plain")],
        vec![item("c", "c", "text/plain")],
    ]));
    let mut paginator = Paginator::new(store.clone(), 1000);

    let mut pages = 0;
    while let Some(items) = paginator.next_page().await.unwrap() {
        assert_eq!(items.len(), 1);
        pages += 1;
    }

    assert_eq!(pages, 3);
    assert_eq!(store.page_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_empty_catalog_yields_one_empty_page() {
    let store = Arc::new(MockStore::with_pages(vec![vec![]]));
    let mut paginator = Paginator::new(store, 1000);

    let page = paginator.next_page().await.unwrap().unwrap();
    assert!(page.is_empty());
    assert!(paginator.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_listing_error_is_a_pagination_error() {
    let store = Arc::new(
        MockStore::with_pages(vec![
            vec![item("a", "a", "text/plain")],
            vec![item("b", "b", "text/plain")],
        ])
        .fail_listing_at(1),
    );
    let mut paginator = Paginator::new(store, 1000);

    assert!(paginator.next_page().await.unwrap().is_some());

    let err = paginator.next_page().await.unwrap_err();
    assert!(matches!(err, Error::Pagination(_)));
    assert!(err.to_string().contains("listing backend unavailable"));

    // A failed walker stays exhausted instead of retrying
    assert!(paginator.next_page().await.unwrap().is_none());
}
