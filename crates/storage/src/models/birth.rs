use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Calendar date of birth as submitted.
///
/// Components are range checked only. The day is not cross-checked against
/// the month, so `{2001, 2, 31}` is accepted and the age computation works
/// directly on the submitted month/day pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BirthDate {
    #[validate(range(min = 1924, max = 2009, message = "Year must be between 1924 and 2009"))]
    pub year: i32,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: u32,

    #[validate(range(min = 1, max = 31, message = "Day must be between 1 and 31"))]
    pub day: u32,
}

impl BirthDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BirthTime {
    #[validate(range(max = 23, message = "Hour must be between 0 and 23"))]
    pub hour: u32,

    #[validate(range(max = 59, message = "Minute must be between 0 and 59"))]
    pub minute: u32,
}
