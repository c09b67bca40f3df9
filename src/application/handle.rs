use axum::{extract::State, http::StatusCode};

use dorm_move_shared::application::{handle::*, Application};

use crate::{
    extract::{Json, Path, Query},
    AppState, Error,
};

/// Apply to a post.
pub async fn apply(
    State(store): State<AppState>,
    Json(descriptor): Json<ApplyDescriptor>,
) -> Result<(StatusCode, Json<Application>), Error> {
    let application = store.write(|db| super::apply(db, descriptor))?;
    tracing::info!(
        application = application.id,
        post = application.post_id,
        applicant = application.applicant_id,
        "application submitted"
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// Get applications by post or applicant.
pub async fn get_applications(
    State(store): State<AppState>,
    Query(query): Query<ApplicationQuery>,
) -> Json<Vec<Application>> {
    Json(
        store
            .read()
            .applications
            .iter()
            .filter(|a| query.matches(a))
            .cloned()
            .collect(),
    )
}

/// Accept or reject an application.
pub async fn review_application(
    State(store): State<AppState>,
    Path(id): Path<u64>,
    Json(descriptor): Json<ApplicationStatusDescriptor>,
) -> Result<Json<Application>, Error> {
    let application = store.write(|db| super::review(db, id, descriptor.status))?;
    tracing::info!(
        application = id,
        status = ?application.status,
        "application reviewed"
    );

    Ok(Json(application))
}
