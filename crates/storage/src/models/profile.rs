use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::{AstrologicalSign, BirthDate, BirthTime, Gender, Height, Weight};
use crate::error::StorageError;

/// A stored personal-details submission.
///
/// `calculated_age` and `is_eligible` reflect `date_of_birth` and `gender`
/// as of `updated_at`; they are never recomputed on read.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub profile_id: Uuid,
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
    pub origin: ClientOrigin,
}

/// Network metadata of the submitting client. Never exposed by read paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOrigin {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Flat row shape of the `personal_details` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub profile_id: Uuid,
    pub full_name: String,
    pub gender: String,
    pub birth_year: i32,
    pub birth_month: i32,
    pub birth_day: i32,
    pub birth_hour: Option<i32>,
    pub birth_minute: Option<i32>,
    pub birth_place: String,
    pub height_value: Option<String>,
    pub height_unit: String,
    pub weight_value: Option<Decimal>,
    pub weight_unit: String,
    pub astrological_sign: Option<String>,
    pub calculated_age: i32,
    pub is_eligible: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

fn to_component(column: &str, value: i32) -> Result<u32, StorageError> {
    u32::try_from(value)
        .map_err(|_| StorageError::InvalidData(format!("Negative {}: {}", column, value)))
}

impl TryFrom<ProfileRow> for ProfileRecord {
    type Error = StorageError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let time_of_birth = match (row.birth_hour, row.birth_minute) {
            (Some(hour), Some(minute)) => Some(BirthTime {
                hour: to_component("birth_hour", hour)?,
                minute: to_component("birth_minute", minute)?,
            }),
            _ => None,
        };

        Ok(Self {
            profile_id: row.profile_id,
            full_name: row.full_name,
            gender: row.gender.parse()?,
            date_of_birth: BirthDate {
                year: row.birth_year,
                month: to_component("birth_month", row.birth_month)?,
                day: to_component("birth_day", row.birth_day)?,
            },
            time_of_birth,
            birth_place: row.birth_place,
            height: Height {
                value: row.height_value,
                unit: row.height_unit.parse()?,
            },
            weight: Weight {
                value: row.weight_value,
                unit: row.weight_unit.parse()?,
            },
            astrological_sign: row
                .astrological_sign
                .as_deref()
                .map(str::parse)
                .transpose()?,
            calculated_age: row.calculated_age,
            is_eligible: row.is_eligible,
            created_at: row.created_at,
            updated_at: row.updated_at,
            origin: ClientOrigin {
                ip_address: row.ip_address,
                user_agent: row.user_agent,
            },
        })
    }
}
