use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::stats::StatsReport};

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Aggregate statistics over all submissions", body = StatsReport)
    ),
    tag = "stats"
)]
pub async fn get_stats(State(db): State<Database>) -> WebResult<Response> {
    let report = services::get_stats(db.pool()).await?;

    Ok(Json(report).into_response())
}
