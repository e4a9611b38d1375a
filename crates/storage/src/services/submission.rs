use chrono::NaiveDateTime;
use uuid::Uuid;

use super::eligibility;
use crate::dto::profile::{CreateProfileRequest, UpdateProfileRequest};
use crate::models::{ClientOrigin, ProfileRecord};

/// Builds the record for a new submission, deriving age and eligibility as of `now`.
pub fn new_profile(
    req: &CreateProfileRequest,
    origin: ClientOrigin,
    now: NaiveDateTime,
) -> ProfileRecord {
    let stamp = eligibility::stamp(&req.date_of_birth, req.gender, now);

    ProfileRecord {
        profile_id: Uuid::new_v4(),
        full_name: req.full_name.trim().to_string(),
        gender: req.gender,
        date_of_birth: req.date_of_birth,
        time_of_birth: req.time_of_birth,
        birth_place: req.birth_place.trim().to_string(),
        height: req.height.clone(),
        weight: req.weight.clone(),
        astrological_sign: req.astrological_sign,
        calculated_age: stamp.eligibility.calculated_age,
        is_eligible: stamp.eligibility.is_eligible,
        created_at: now,
        updated_at: stamp.updated_at,
        origin,
    }
}

/// Merges an update into `existing` and re-derives the computed fields.
pub fn apply_update(existing: &mut ProfileRecord, req: &UpdateProfileRequest, now: NaiveDateTime) {
    if let Some(full_name) = &req.full_name {
        existing.full_name = full_name.trim().to_string();
    }
    if let Some(gender) = req.gender {
        existing.gender = gender;
    }
    if let Some(date_of_birth) = req.date_of_birth {
        existing.date_of_birth = date_of_birth;
    }
    if let Some(time_of_birth) = req.time_of_birth {
        existing.time_of_birth = Some(time_of_birth);
    }
    if let Some(birth_place) = &req.birth_place {
        existing.birth_place = birth_place.trim().to_string();
    }
    if let Some(height) = &req.height {
        existing.height = height.clone();
    }
    if let Some(weight) = &req.weight {
        existing.weight = weight.clone();
    }
    if let Some(sign) = req.astrological_sign {
        existing.astrological_sign = Some(sign);
    }

    let stamp = eligibility::stamp(&existing.date_of_birth, existing.gender, now);
    existing.calculated_age = stamp.eligibility.calculated_age;
    existing.is_eligible = stamp.eligibility.is_eligible;
    existing.updated_at = stamp.updated_at;
}
