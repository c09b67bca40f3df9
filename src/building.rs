use axum::{extract::State, Json};

use dorm_move_shared::Building;

use crate::AppState;

/// Get every building.
pub async fn get_buildings(State(store): State<AppState>) -> Json<Vec<Building>> {
    Json(store.read().buildings.clone())
}
