//! Sequential page loading and cancellation in the fetcher.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_api::ScriptedPhotosApi;
use common::{photo_ids, photos_page};
use flickr_search::api::ApiError;
use flickr_search::search::{FetchResult, SearchedPhotosFetcher};

fn photos_of(result: Option<FetchResult>) -> Vec<String> {
    match result {
        Some(FetchResult::Photos(photos)) => photo_ids(&photos),
        other => panic!("expected photos, got {:?}", other),
    }
}

#[tokio::test]
async fn loads_pages_until_the_last_one() {
    let api = Arc::new(
        ScriptedPhotosApi::new()
            .with_page("cat", photos_page(1, 3, &["1", "2"]))
            .with_page("cat", photos_page(2, 3, &["3"]))
            .with_page("cat", photos_page(3, 3, &["4"])),
    );
    let fetcher = SearchedPhotosFetcher::new(api.clone(), 2);

    assert_eq!(photos_of(fetcher.load_first_page("cat").await), ["1", "2"]);
    assert_eq!(photos_of(fetcher.load_next_page().await), ["3"]);
    assert_eq!(photos_of(fetcher.load_next_page().await), ["4"]);
    assert!(fetcher.load_next_page().await.is_none());

    let session = fetcher.search_info().unwrap();
    assert_eq!(session.query, "cat");
    assert_eq!(session.paginator.current_page(), 3);
    assert!(session.paginator.is_last_page());

    let pages: Vec<u32> = api.search_calls().iter().map(|call| call.page).collect();
    assert_eq!(pages, [1, 2, 3]);
    assert!(api.search_calls().iter().all(|call| call.page_size == 2));
}

#[tokio::test]
async fn empty_first_page_reports_empty() {
    let api = Arc::new(ScriptedPhotosApi::new().with_page("zzz", photos_page(1, 0, &[])));
    let fetcher = SearchedPhotosFetcher::new(api, 21);

    assert!(matches!(
        fetcher.load_first_page("zzz").await,
        Some(FetchResult::Empty)
    ));
    assert!(fetcher.load_next_page().await.is_none());
}

#[tokio::test]
async fn empty_continuation_page_ends_session() {
    let api = Arc::new(
        ScriptedPhotosApi::new()
            .with_page("cat", photos_page(1, 4, &["1"]))
            .with_page("cat", photos_page(2, 4, &[])),
    );
    let fetcher = SearchedPhotosFetcher::new(api.clone(), 21);

    fetcher.load_first_page("cat").await;
    assert!(matches!(
        fetcher.load_next_page().await,
        Some(FetchResult::Empty)
    ));
    assert!(fetcher.load_next_page().await.is_none());
    assert_eq!(api.search_calls().len(), 2);
}

#[tokio::test]
async fn failed_page_is_reported_and_can_be_retried() {
    let api = Arc::new(
        ScriptedPhotosApi::new()
            .with_page("cat", photos_page(1, 2, &["1"]))
            .with_failure("cat", 2, "Service unavailable"),
    );
    let fetcher = SearchedPhotosFetcher::new(api.clone(), 21);

    fetcher.load_first_page("cat").await;
    match fetcher.load_next_page().await {
        Some(FetchResult::Error(ApiError::Remote { message, .. })) => {
            assert_eq!(message, "Service unavailable")
        }
        other => panic!("expected remote error, got {:?}", other),
    }

    assert_eq!(fetcher.search_info().unwrap().paginator.current_page(), 1);
    fetcher.load_next_page().await;
    assert_eq!(api.search_calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn cancelled_request_yields_nothing() {
    let api = Arc::new(ScriptedPhotosApi::new().with_delayed_page(
        "cat",
        photos_page(1, 1, &["1"]),
        Duration::from_secs(5),
    ));
    let fetcher = Arc::new(SearchedPhotosFetcher::new(api, 21));

    let loading = tokio::spawn({
        let fetcher = Arc::clone(&fetcher);
        async move { fetcher.load_first_page("cat").await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    fetcher.cancel_current_request();

    assert!(loading.await.unwrap().is_none());
    assert!(fetcher.search_info().is_none());
}

#[tokio::test(start_paused = true)]
async fn new_query_supersedes_previous_one() {
    let api = Arc::new(
        ScriptedPhotosApi::new()
            .with_delayed_page("a", photos_page(1, 1, &["a1"]), Duration::from_secs(5))
            .with_page("b", photos_page(1, 1, &["b1"])),
    );
    let fetcher = Arc::new(SearchedPhotosFetcher::new(api, 21));

    let first = tokio::spawn({
        let fetcher = Arc::clone(&fetcher);
        async move { fetcher.load_first_page("a").await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(photos_of(fetcher.load_first_page("b").await), ["b1"]);
    assert!(first.await.unwrap().is_none());
    assert_eq!(fetcher.search_info().unwrap().query, "b");
}
