use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn all() -> &'static [Gender] {
        &[Self::Male, Self::Female]
    }

    fn parse_str(s: &str) -> Result<Self, StorageError> {
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| StorageError::InvalidData(format!("Unknown gender: '{}'", s)))
    }
}

impl std::str::FromStr for Gender {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
