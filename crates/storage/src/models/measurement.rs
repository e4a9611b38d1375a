use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::StorageError;

pub const MIN_WEIGHT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
pub const MAX_WEIGHT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cms,
    Feet,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cms => "cms",
            Self::Feet => "feet",
        }
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cms" => Ok(Self::Cms),
            "feet" => Ok(Self::Feet),
            _ => Err(StorageError::InvalidData(format!("Unknown height unit: '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Self::Kg),
            "lbs" => Ok(Self::Lbs),
            _ => Err(StorageError::InvalidData(format!("Unknown weight unit: '{}'", s))),
        }
    }
}

/// Height is free text (e.g. `5'8"` or `172`), interpreted through its unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Height {
    pub value: Option<String>,

    #[serde(default)]
    pub unit: HeightUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Weight {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_weight_value"))]
    pub value: Option<Decimal>,

    #[serde(default)]
    pub unit: WeightUnit,
}

fn validate_weight_value(value: &Decimal) -> Result<(), ValidationError> {
    if *value < MIN_WEIGHT {
        return Err(ValidationError::new("range").with_message("Weight must be at least 20".into()));
    }
    if *value > MAX_WEIGHT {
        return Err(
            ValidationError::new("range").with_message("Weight cannot exceed 500".into()),
        );
    }
    Ok(())
}
