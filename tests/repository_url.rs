mod common;

use short_url_service::domain::repositories::UrlRepository;
use short_url_service::infrastructure::persistence::PgUrlRepository;
use short_url_service::utils::base62::{decode, short_code};
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_derives_code_from_id(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-1", "owner1@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let url = repo
        .create(owner, "https://example.com/a", short_code)
        .await
        .unwrap();

    assert_eq!(url.original_url, "https://example.com/a");
    assert_eq!(url.code, short_code(url.id as u64));
    assert_eq!(decode(&url.code), Some(url.id as u64));
}

#[sqlx::test]
async fn test_create_writes_meta_row(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-2", "owner2@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let url = repo
        .create(owner, "https://example.com/meta", short_code)
        .await
        .unwrap();

    let details = repo.find_meta(owner, url.id).await.unwrap().unwrap();
    assert_eq!(details.meta.url_id, url.id);
    assert_eq!(details.meta.user_id, Some(owner));
    assert_eq!(details.code, url.code);
    assert!(details.meta.last_clicked_time.is_none());
}

#[sqlx::test]
async fn test_create_with_unknown_owner_leaves_nothing_behind(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let result = repo.create(999_999, "https://example.com", short_code).await;
    assert!(result.is_err());

    let urls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(urls, 0);
}

#[sqlx::test]
async fn test_same_destination_gets_distinct_codes(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-3", "owner3@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let a = repo.create(owner, "https://example.com", short_code).await.unwrap();
    let b = repo.create(owner, "https://example.com", short_code).await.unwrap();

    assert_ne!(a.code, b.code);
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo.find_by_code("zzzzzz").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_delete_owned_only_by_owner(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-4", "owner4@x.com").await;
    let other = common::create_test_user(&pool, "pub-other-4", "other4@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let url = repo.create(owner, "https://example.com", short_code).await.unwrap();

    assert!(!repo.delete_owned(other, &url.code).await.unwrap());
    assert!(repo.find_by_code(&url.code).await.unwrap().is_some());

    assert!(repo.delete_owned(owner, &url.code).await.unwrap());
    assert!(repo.find_by_code(&url.code).await.unwrap().is_none());
    assert!(!repo.delete_owned(owner, &url.code).await.unwrap());
}

#[sqlx::test]
async fn test_delete_cascades_meta_and_history(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-5", "owner5@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let url = repo.create(owner, "https://example.com", short_code).await.unwrap();
    repo.record_click(&url.code).await.unwrap().unwrap();
    repo.record_click(&url.code).await.unwrap().unwrap();

    assert!(repo.delete_by_code(&url.code).await.unwrap());

    assert_eq!(common::count_clicks(&pool, url.id).await, 0);
    assert!(repo.find_meta(owner, url.id).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_meta_is_owner_scoped(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-6", "owner6@x.com").await;
    let other = common::create_test_user(&pool, "pub-other-6", "other6@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let url = repo.create(owner, "https://example.com", short_code).await.unwrap();

    assert!(repo.find_meta(other, url.id).await.unwrap().is_none());
    assert!(repo.find_meta(owner, url.id).await.unwrap().is_some());
}

#[sqlx::test]
async fn test_record_click_unknown_code_writes_nothing(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let result = repo.record_click("000zzz").await.unwrap();
    assert!(result.is_none());

    let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_click_history")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(clicks, 0);
}

#[sqlx::test]
async fn test_record_click_appends_and_tracks_latest(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-7", "owner7@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let url = repo.create(owner, "https://example.com/c", short_code).await.unwrap();

    let mut last = None;
    for _ in 0..3 {
        let click = repo.record_click(&url.code).await.unwrap().unwrap();
        assert_eq!(click.url_id, url.id);
        assert_eq!(click.original_url, "https://example.com/c");
        last = Some(click.clicked_time);
    }

    let clicks = repo.list_clicks(url.id).await.unwrap();
    assert_eq!(clicks.len(), 3);
    assert!(clicks.windows(2).all(|w| w[0].clicked_time <= w[1].clicked_time));

    let details = repo.find_meta(owner, url.id).await.unwrap().unwrap();
    assert_eq!(details.meta.last_clicked_time, last);
    assert_eq!(details.meta.last_clicked_time, Some(clicks[2].clicked_time));
}

#[sqlx::test]
async fn test_concurrent_clicks_are_all_recorded(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-8", "owner8@x.com").await;
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));

    let url = repo.create(owner, "https://example.com/hot", short_code).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let repo = repo.clone();
        let code = url.code.clone();
        handles.push(tokio::spawn(async move { repo.record_click(&code).await }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    assert_eq!(common::count_clicks(&pool, url.id).await, 10);

    let clicks = repo.list_clicks(url.id).await.unwrap();
    let latest = clicks.iter().map(|c| c.clicked_time).max();
    let details = repo.find_meta(owner, url.id).await.unwrap().unwrap();
    assert_eq!(details.meta.last_clicked_time, latest);
}

#[sqlx::test]
async fn test_list_by_owner_newest_first(pool: PgPool) {
    let owner = common::create_test_user(&pool, "pub-owner-9", "owner9@x.com").await;
    let other = common::create_test_user(&pool, "pub-other-9", "other9@x.com").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let first = repo.create(owner, "https://example.com/1", short_code).await.unwrap();
    let second = repo.create(owner, "https://example.com/2", short_code).await.unwrap();
    repo.create(other, "https://example.com/3", short_code).await.unwrap();

    let urls = repo.list_by_owner(owner).await.unwrap();

    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0].id, second.id);
    assert_eq!(urls[1].id, first.id);
    assert_eq!(repo.count_all().await.unwrap(), 3);
}
