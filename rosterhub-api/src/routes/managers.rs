/// Manager directory endpoint
///
/// Managers are read-only at runtime; this endpoint exposes the active set
/// so clients can offer explicit reassignment targets.
///
/// # Endpoints
///
/// - `GET /get_managers` - List all active managers

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use rosterhub_shared::models::manager::Manager;
use serde::Serialize;

/// Manager listing response
#[derive(Debug, Serialize)]
pub struct GetManagersResponse {
    pub success: bool,
    pub managers: Vec<Manager>,
}

/// Lists all managers eligible for assignment
pub async fn get_managers(State(state): State<AppState>) -> ApiResult<Json<GetManagersResponse>> {
    let managers = Manager::list_active(&state.db).await?;

    tracing::info!(count = managers.len(), "retrieved active managers");

    Ok(Json(GetManagersResponse {
        success: true,
        managers,
    }))
}
