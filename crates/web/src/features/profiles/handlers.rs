use std::net::SocketAddr;

use axum::{
    Json,
    extract::{
        ConnectInfo, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        profile::{CreateProfileRequest, ProfileQuery, ProfileResponse, UpdateProfileRequest},
    },
    models::ClientOrigin,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{WebError, WebResult};

use super::services;

fn parse_id(id: &str) -> WebResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| WebError::BadRequest("Invalid ID format".to_string()))
}

fn client_origin(addr: Option<ConnectInfo<SocketAddr>>, headers: &HeaderMap) -> ClientOrigin {
    ClientOrigin {
        ip_address: addr.map(|ConnectInfo(addr)| addr.ip().to_string()),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(String::from),
    }
}

#[utoipa::path(
    get,
    path = "/api/personal-details",
    params(ProfileQuery),
    responses(
        (status = 200, description = "Page of personal details, newest first", body = PaginatedResponse<ProfileResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "personal-details"
)]
pub async fn list_profiles(
    State(db): State<Database>,
    query: Result<Query<ProfileQuery>, QueryRejection>,
) -> WebResult<Response> {
    let Query(query) = query?;
    query.validate().map_err(WebError::BadRequest)?;

    let response = services::list_profiles(db.pool(), &query).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/personal-details/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Personal details found", body = ProfileResponse),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Personal details not found")
    ),
    tag = "personal-details"
)]
pub async fn get_profile(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    let id = parse_id(&id)?;
    let record = services::get_profile(db.pool(), id).await?;

    Ok(Json(ProfileResponse::from(record)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/personal-details",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Personal details saved successfully", body = ProfileResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "personal-details"
)]
pub async fn create_profile(
    State(db): State<Database>,
    addr: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<CreateProfileRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = payload?;
    req.validate()?;

    let origin = client_origin(addr, &headers);
    let record = services::create_profile(db.pool(), &req, origin).await?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(record))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/personal-details/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Personal details updated successfully", body = ProfileResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Personal details not found")
    ),
    tag = "personal-details"
)]
pub async fn update_profile(
    State(db): State<Database>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> WebResult<Response> {
    let id = parse_id(&id)?;
    let Json(update_req) = payload?;
    update_req.validate()?;

    let updated = services::update_profile(db.pool(), id, &update_req).await?;

    Ok(Json(ProfileResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/personal-details/{id}",
    params(
        ("id" = Uuid, Path, description = "Submission ID")
    ),
    responses(
        (status = 204, description = "Personal details deleted successfully"),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Personal details not found")
    ),
    tag = "personal-details"
)]
pub async fn delete_profile(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> WebResult<Response> {
    let id = parse_id(&id)?;
    services::delete_profile(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
