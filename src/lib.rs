//! The JSON data store behind the dorm-move board.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde::Serialize;

pub mod config;
pub mod db;
pub mod extract;

pub mod account;
pub mod application;
pub mod building;
pub mod post;

/// The module for unit testing, will only be availabled in dev env.
#[cfg(test)]
mod tests;

pub use db::Store;

/// Shared state of every handler.
pub type AppState = Arc<Store>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} {1} not found")]
    NotFound(&'static str, u64),
    #[error("email or password incorrect")]
    InvalidCredentials,
    #[error("invalid form: {0}")]
    Validation(String),
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("email already registered")]
    EmailTaken,

    #[error("user {0} already applied to this post")]
    AlreadyApplied(u64),
    #[error("post {0} is not open")]
    PostNotOpen(u64),
    #[error("post {0} already has an accepted application")]
    AlreadyMatched(u64),
    #[error("accepted applications are final")]
    AcceptedFinal,
    #[error("post status can only be changed to completed")]
    StatusTransition,

    #[error("failed to access data file: {0}")]
    Persist(std::io::Error),
    #[error("malformed snapshot: {0}")]
    Snapshot(serde_json::Error),
}

impl Error {
    pub fn to_status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(..) => StatusCode::NOT_FOUND,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Validation(_) | Error::Malformed(_) => StatusCode::BAD_REQUEST,
            Error::EmailTaken
            | Error::AlreadyApplied(_)
            | Error::PostNotOpen(_)
            | Error::AlreadyMatched(_)
            | Error::AcceptedFinal
            | Error::StatusTransition => StatusCode::CONFLICT,
            Error::Persist(_) | Error::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Joins rejected form fields into a [`Error::Validation`].
    pub fn validation(fields: &[dorm_move_shared::validate::FieldError]) -> Self {
        Self::Validation(
            fields
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl IntoResponse for Error {
    #[inline]
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorInfo {
            error: String,
        }

        let status = self.to_status_code();
        if status.is_server_error() {
            tracing::error!("{self}");
        }

        (
            status,
            axum::Json(ErrorInfo {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Construct a router.
pub fn router(store: AppState) -> axum::Router {
    axum::Router::new()
        // account
        .route("/auth/login", post(account::handle::login))
        .route(
            "/users",
            get(account::handle::list_users).post(account::handle::register),
        )
        .route(
            "/users/:id",
            get(account::handle::view_user).put(account::handle::edit_user),
        )
        // posting
        .route(
            "/posts",
            get(post::handle::get_posts).post(post::handle::new_post),
        )
        .route(
            "/posts/:id",
            get(post::handle::get_post)
                .patch(post::handle::edit_post)
                .delete(post::handle::delete_post),
        )
        .route("/posts/:id/views", post(post::handle::count_view))
        // applying
        .route(
            "/applications",
            get(application::handle::get_applications).post(application::handle::apply),
        )
        .route(
            "/applications/:id",
            patch(application::handle::review_application),
        )
        .route("/buildings", get(building::get_buildings))
        .with_state(store)
}
