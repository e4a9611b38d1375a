use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::common::{PaginationParams, default_limit, default_page};
use crate::models::{
    AstrologicalSign, BirthDate, BirthTime, Gender, Height, ProfileRecord, Weight,
};

pub const MAX_FULL_NAME_LENGTH: usize = 100;
pub const MAX_BIRTH_PLACE_LENGTH: usize = 200;

/// Personal details as returned to clients. Origin metadata is never included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: BirthDate,
    pub time_of_birth: Option<BirthTime>,
    pub birth_place: String,
    pub height: Height,
    pub weight: Weight,
    pub astrological_sign: Option<AstrologicalSign>,
    pub calculated_age: i32,
    pub is_eligible: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request payload for submitting personal details
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    pub gender: Gender,

    #[validate(nested)]
    pub date_of_birth: BirthDate,

    #[validate(nested)]
    pub time_of_birth: Option<BirthTime>,

    #[validate(custom(function = "validate_birth_place"))]
    pub birth_place: String,

    #[serde(default)]
    pub height: Height,

    #[serde(default)]
    #[validate(nested)]
    pub weight: Weight,

    pub astrological_sign: Option<AstrologicalSign>,
}

/// Request payload for updating submitted personal details.
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: Option<String>,

    pub gender: Option<Gender>,

    #[validate(nested)]
    pub date_of_birth: Option<BirthDate>,

    #[validate(nested)]
    pub time_of_birth: Option<BirthTime>,

    #[validate(custom(function = "validate_birth_place"))]
    pub birth_place: Option<String>,

    pub height: Option<Height>,

    #[validate(nested)]
    pub weight: Option<Weight>,

    pub astrological_sign: Option<AstrologicalSign>,
}

/// Conjunction of listing predicates; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    pub gender: Option<Gender>,
    pub astrological_sign: Option<AstrologicalSign>,
    pub is_eligible: Option<bool>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl ProfileFilter {
    pub fn matches(&self, record: &ProfileRecord) -> bool {
        self.gender.is_none_or(|g| record.gender == g)
            && self
                .astrological_sign
                .is_none_or(|s| record.astrological_sign == Some(s))
            && self.is_eligible.is_none_or(|e| record.is_eligible == e)
            && self.min_age.is_none_or(|min| record.calculated_age >= min)
            && self.max_age.is_none_or(|max| record.calculated_age <= max)
    }
}

/// Query string of the listing endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub gender: Option<Gender>,
    pub astrological_sign: Option<AstrologicalSign>,
    pub is_eligible: Option<bool>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl ProfileQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }

    pub fn filter(&self) -> ProfileFilter {
        ProfileFilter {
            gender: self.gender,
            astrological_sign: self.astrological_sign,
            is_eligible: self.is_eligible,
            min_age: self.min_age,
            max_age: self.max_age,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}

/// Request payload for the pre-submission eligibility check
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCheckRequest {
    #[validate(nested)]
    pub date_of_birth: BirthDate,

    pub gender: Gender,

    /// Date to compute the age against; today when omitted
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCheckResponse {
    pub calculated_age: i32,
    pub is_eligible: bool,
    pub min_age: i32,
    pub max_age: i32,
    pub message: Option<String>,
    pub redirect: bool,
}

fn validate_trimmed_length(
    value: &str,
    max: usize,
    field: &'static str,
) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();
    if length == 0 {
        return Err(ValidationError::new("required")
            .with_message(format!("{} is required", field).into()));
    }
    if length > max {
        return Err(ValidationError::new("length")
            .with_message(format!("{} cannot exceed {} characters", field, max).into()));
    }
    Ok(())
}

fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    validate_trimmed_length(full_name, MAX_FULL_NAME_LENGTH, "Full name")
}

fn validate_birth_place(birth_place: &str) -> Result<(), ValidationError> {
    validate_trimmed_length(birth_place, MAX_BIRTH_PLACE_LENGTH, "Birth place")
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(record: ProfileRecord) -> Self {
        Self {
            id: record.profile_id,
            full_name: record.full_name,
            gender: record.gender,
            date_of_birth: record.date_of_birth,
            time_of_birth: record.time_of_birth,
            birth_place: record.birth_place,
            height: record.height,
            weight: record.weight,
            astrological_sign: record.astrological_sign,
            calculated_age: record.calculated_age,
            is_eligible: record.is_eligible,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
