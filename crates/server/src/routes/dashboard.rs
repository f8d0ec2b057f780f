use axum::{extract::State, Json};
use service::dashboard::{self, Dashboard};

use crate::errors::ApiError;
use crate::extract::Ctx;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/dashboard", tag = "backend",
    responses((status = 200, description = "Category, comment and hit aggregates"), (status = 401, description = "Not signed in"))
)]
pub async fn index(State(state): State<ServerState>, Ctx(ctx): Ctx) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(dashboard::dashboard(&state.db, &ctx).await?))
}
