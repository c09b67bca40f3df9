use axum::{extract::State, http::StatusCode};

use dorm_move_shared::account::{handle::*, User};

use crate::{
    extract::{Json, Path, Query},
    AppState, Error,
};

/// Register a user.
pub async fn register(
    State(store): State<AppState>,
    Json(descriptor): Json<RegisterDescriptor>,
) -> Result<(StatusCode, Json<User>), Error> {
    let user = store.write(|db| super::register(db, descriptor))?;
    tracing::info!(user = user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with email and password in the request body.
pub async fn login(
    State(store): State<AppState>,
    Json(descriptor): Json<LoginDescriptor>,
) -> Result<Json<User>, Error> {
    let result = super::login(&store.read(), &descriptor.email, &descriptor.password);

    match result {
        Ok(user) => {
            tracing::info!(user = user.id, "user logged in");
            Ok(Json(user))
        }
        Err(err) => {
            tracing::info!("login rejected");
            Err(err)
        }
    }
}

/// List users, optionally with an exact email.
pub async fn list_users(
    State(store): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<Vec<User>> {
    let db = store.read();

    Json(
        db.users
            .iter()
            .filter(|u| {
                query
                    .email
                    .as_ref()
                    .map_or(true, |email| u.user.email.eq_ignore_ascii_case(email))
            })
            .map(|u| u.user.clone())
            .collect(),
    )
}

pub async fn view_user(
    State(store): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, Error> {
    Ok(Json(store.read().user(id)?.user.clone()))
}

/// Replace a user's profile.
pub async fn edit_user(
    State(store): State<AppState>,
    Path(id): Path<u64>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>, Error> {
    let user = store.write(|db| super::update(db, id, update))?;
    tracing::info!(user = id, "profile updated");

    Ok(Json(user))
}
