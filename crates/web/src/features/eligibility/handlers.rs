use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use storage::dto::profile::{EligibilityCheckRequest, EligibilityCheckResponse};
use validator::Validate;

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    post,
    path = "/api/eligibility/check",
    request_body = EligibilityCheckRequest,
    responses(
        (status = 200, description = "Computed age and eligibility verdict", body = EligibilityCheckResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "eligibility"
)]
pub async fn check_eligibility(
    payload: Result<Json<EligibilityCheckRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = payload?;
    req.validate()?;

    let response = services::check_eligibility(&req);
    if !response.is_eligible {
        tracing::debug!(
            calculated_age = response.calculated_age,
            redirect = response.redirect,
            "Advisory check rejected"
        );
    }

    Ok(Json(response).into_response())
}
