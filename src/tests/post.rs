use super::*;

use axum::http::{Request, StatusCode};
use dorm_move_client::{
    listing::{self, Listing},
    MoveDetails, PostDescriptor, PostPatch, PostQuery, PostStatus, PostType,
};
use tower::util::ServiceExt;

use crate::post::handle::TOTAL_COUNT_HEADER;

pub(super) fn descriptor(title: &str, kind: PostType, from: &str, to: &str) -> PostDescriptor {
    PostDescriptor {
        title: title.to_string(),
        description: "Moving two boxes and a desk lamp.".to_string(),
        kind,
        details: MoveDetails {
            author_name: Some("Kim Minji".to_string()),
            from_building: Some(from.to_string()),
            from_room: Some("302".to_string()),
            to_building: Some(to.to_string()),
            to_room: Some("115".to_string()),
            move_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1),
            move_time: Some("14:00".to_string()),
            price: Some(10_000),
            ..Default::default()
        },
    }
}

/// Test: a created post reads back unchanged.
#[tokio::test]
async fn create_and_read_back() {
    let (cx, _store) = serve();

    let sent = descriptor(
        "Need help moving",
        PostType::HelpRequest,
        "Hanul Hall",
        "Saebit Hall",
    );
    let created = cx.create_post(&sent).await.unwrap();

    assert_eq!(created.title, sent.title);
    assert_eq!(created.description, sent.description);
    assert_eq!(created.kind, sent.kind);
    assert_eq!(created.details, sent.details);

    assert_eq!(created.status, PostStatus::Open);
    assert_eq!(created.views, 0);
    assert!(created.applicants.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    assert_eq!(cx.get_post(created.id).await.unwrap(), created);

    let err = cx.get_post(created.id + 1).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

/// Test: filtering by type keeps only that type, newest first.
#[tokio::test]
async fn filter_by_type() {
    let (cx, _store) = serve();

    for (title, kind) in [
        ("First request", PostType::HelpRequest),
        ("An offer", PostType::HelpOffer),
        ("Second request", PostType::HelpRequest),
    ] {
        cx.create_post(&descriptor(title, kind, "Hanul Hall", "Mirae Hall"))
            .await
            .unwrap();
    }

    let requests = cx
        .get_all_posts(&PostQuery {
            kind: Some(PostType::HelpRequest),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        requests.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        ["Second request", "First request"]
    );
    assert!(requests.iter().all(|p| p.kind == PostType::HelpRequest));
}

/// Test: client-side search matches the source building.
#[tokio::test]
async fn search_by_building() {
    let (cx, _store) = serve();

    cx.create_post(&descriptor(
        "Desk to carry",
        PostType::HelpRequest,
        "Haemil Hall",
        "Hanul Hall",
    ))
    .await
    .unwrap();
    cx.create_post(&descriptor(
        "Boxes to carry",
        PostType::HelpOffer,
        "Saebit Hall",
        "Mirae Hall",
    ))
    .await
    .unwrap();

    let posts = cx.get_all_posts(&PostQuery::default()).await.unwrap();
    let found = listing::search(&posts, "haemil");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Desk to carry");

    let mut listing = Listing::new(posts);
    listing.set_search("MIRAE");
    assert_eq!(listing.current().len(), 1);
    assert_eq!(listing.current()[0].title, "Boxes to carry");

    listing.set_search("HALL");
    assert_eq!(listing.current().len(), 2);

    // the store's own full-text query agrees
    let found = cx.search_posts("haemil").await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn paged_listing_reports_total() {
    let store = Arc::new(Store::new(Db::default()));
    store
        .write(|db| {
            for i in 0..13 {
                crate::post::create(
                    db,
                    descriptor(
                        &format!("Post {i}"),
                        PostType::HelpOffer,
                        "Hanul Hall",
                        "Saebit Hall",
                    ),
                )?;
            }
            Ok(())
        })
        .unwrap();

    let response = crate::router(store)
        .oneshot(
            Request::builder()
                .uri("/posts?_sort=createdAt&_order=desc&_page=3&_limit=6")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(TOTAL_COUNT_HEADER).unwrap(),
        "13"
    );

    let posts: Vec<dorm_move_client::Post> =
        serde_json::from_slice(&hyper::body::to_bytes(response.into_body()).await.unwrap())
            .unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 1);
}

/// Test: concurrent view counts are never lost.
#[tokio::test]
async fn concurrent_views() {
    let (cx, _store) = serve();
    let post = cx
        .create_post(&descriptor(
            "Popular post",
            PostType::HelpOffer,
            "Hanul Hall",
            "Saebit Hall",
        ))
        .await
        .unwrap();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let cx = cx.clone();
            tokio::spawn(async move { cx.increment_views(post.id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(cx.get_post(post.id).await.unwrap().views, 10);
}

#[tokio::test]
async fn update_and_complete() {
    let (cx, _store) = serve();
    let post = cx
        .create_post(&descriptor(
            "Need a hand",
            PostType::HelpRequest,
            "Hanul Hall",
            "Saebit Hall",
        ))
        .await
        .unwrap();

    let updated = cx
        .update_post(
            post.id,
            &PostPatch {
                title: Some("Need a strong hand".to_string()),
                details: MoveDetails {
                    price: Some(15_000),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Need a strong hand");
    assert_eq!(updated.details.price, Some(15_000));
    assert_eq!(updated.details.from_building.as_deref(), Some("Hanul Hall"));
    assert!(updated.updated_at >= post.updated_at);

    let err = cx
        .update_post(
            post.id,
            &PostPatch {
                status: Some(PostStatus::Matched),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(409));

    let completed = cx
        .update_post(
            post.id,
            &PostPatch {
                status: Some(PostStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.status, PostStatus::Completed);
}

#[tokio::test]
async fn delete_removes_applications() {
    let (cx, store) = serve();
    let helper = register(&cx, "Lee Jiho", "jiho@dorm.ac.kr").await;
    let post = cx
        .create_post(&descriptor(
            "Short notice move",
            PostType::HelpRequest,
            "Hanul Hall",
            "Saebit Hall",
        ))
        .await
        .unwrap();
    cx.apply(post.id, helper.id, "I am free that day")
        .await
        .unwrap();

    cx.delete_post(post.id).await.unwrap();

    assert!(cx.applications_for_post(post.id).await.unwrap().is_empty());
    assert!(store.read().applications.is_empty());

    let err = cx.delete_post(post.id).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn malformed_query_has_error_body() {
    let app = crate::router(Arc::new(Store::new(Db::default())));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/posts?_sort=bogus")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response_json: serde_json::Value =
        serde_json::from_slice(&hyper::body::to_bytes(response.into_body()).await.unwrap())
            .unwrap();
    assert!(response_json["error"].as_str().unwrap().contains("bogus"));
}

#[tokio::test]
async fn malformed_id_reaches_client_as_message() {
    let (cx, _store) = serve();

    let err = dorm_move_client::raw::call(BadId, &cx).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert!(err.to_string().contains("malformed request"));
}

struct BadId;

#[async_trait::async_trait]
impl dorm_move_client::raw::Request for BadId {
    type Output = ();

    fn path(&self) -> std::borrow::Cow<'static, str> {
        "/posts/not-a-number".into()
    }

    async fn parse_res(
        &mut self,
        _response: reqwest::Response,
    ) -> Result<Self::Output, dorm_move_client::Error> {
        Ok(())
    }
}
