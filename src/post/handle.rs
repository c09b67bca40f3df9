use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
};
use serde_json::json;

use dorm_move_shared::post::{handle::*, Post};

use crate::{
    extract::{Json, Path, Query},
    AppState, Error,
};

/// Header carrying the number of posts that passed the filters.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Get posts matching the query, sorted and paged.
pub async fn get_posts(
    State(store): State<AppState>,
    Query(query): Query<PostQuery>,
) -> (HeaderMap, Json<Vec<Post>>) {
    let (posts, total) = super::query(&store.read().posts, &query);

    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));

    (headers, Json(posts))
}

pub async fn get_post(
    State(store): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, Error> {
    Ok(Json(store.read().post(id)?.clone()))
}

pub async fn new_post(
    State(store): State<AppState>,
    Json(descriptor): Json<PostDescriptor>,
) -> Result<(StatusCode, Json<Post>), Error> {
    let post = store.write(|db| super::create(db, descriptor))?;
    tracing::info!(post = post.id, kind = ?post.kind, "post created");

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn edit_post(
    State(store): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Post>, Error> {
    let post = store.write(|db| super::edit(db, id, patch))?;
    tracing::info!(post = id, status = ?post.status, "post edited");

    Ok(Json(post))
}

/// Remove the post and its applications.
pub async fn delete_post(
    State(store): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, Error> {
    store.write(|db| super::delete(db, id))?;
    tracing::info!(post = id, "post deleted");

    Ok(Json(json!({})))
}

/// Count one view of the post detail.
pub async fn count_view(
    State(store): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, Error> {
    Ok(Json(store.write(|db| super::count_view(db, id))?))
}
