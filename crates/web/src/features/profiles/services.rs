use chrono::Local;
use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginatedResponse,
        profile::{CreateProfileRequest, ProfileQuery, ProfileResponse, UpdateProfileRequest},
    },
    error::Result,
    models::{ClientOrigin, ProfileRecord},
    repository::profile::ProfileRepository,
    services::{report, submission},
};
use uuid::Uuid;

/// List submissions with filtering and pagination
pub async fn list_profiles(
    pool: &PgPool,
    query: &ProfileQuery,
) -> Result<PaginatedResponse<ProfileResponse>> {
    let params = query.pagination();
    let repo = ProfileRepository::new(pool);
    let (records, total_count) = repo.page(&query.filter(), params).await?;

    Ok(report::page_of(records, params, total_count))
}

/// Get a submission by ID
pub async fn get_profile(pool: &PgPool, id: Uuid) -> Result<ProfileRecord> {
    let repo = ProfileRepository::new(pool);
    repo.find_by_id(id).await
}

/// Derive age and eligibility, then store a new submission
pub async fn create_profile(
    pool: &PgPool,
    request: &CreateProfileRequest,
    origin: ClientOrigin,
) -> Result<ProfileRecord> {
    let record = submission::new_profile(request, origin, Local::now().naive_local());
    tracing::info!(
        profile_id = %record.profile_id,
        calculated_age = record.calculated_age,
        is_eligible = record.is_eligible,
        "Saving personal details"
    );

    let repo = ProfileRepository::new(pool);
    repo.create(&record).await
}

/// Merge an update into a stored submission and re-derive its computed fields
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateProfileRequest,
) -> Result<ProfileRecord> {
    let repo = ProfileRepository::new(pool);
    let now = Local::now().naive_local();

    let updated = repo
        .update_with(id, |existing| submission::apply_update(existing, request, now))
        .await?;
    tracing::info!(
        profile_id = %id,
        calculated_age = updated.calculated_age,
        is_eligible = updated.is_eligible,
        "Updated personal details"
    );

    Ok(updated)
}

/// Delete a submission
pub async fn delete_profile(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = ProfileRepository::new(pool);
    repo.delete(id).await?;
    tracing::info!(profile_id = %id, "Deleted personal details");
    Ok(())
}
