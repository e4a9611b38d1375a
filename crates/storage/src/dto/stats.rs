use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::AstrologicalSign;

/// Summary over every stored submission, independent of any listing filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_users: u64,
    pub eligible_users: u64,
    /// Percentage of eligible submissions, two decimal places
    pub eligibility_rate: f64,
    pub gender_distribution: BTreeMap<String, u64>,
    pub age_statistics: AgeStatistics,
    pub popular_signs: Vec<SignCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgeStatistics {
    pub avg_age: f64,
    pub min_age: i32,
    pub max_age: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignCount {
    pub sign: AstrologicalSign,
    pub count: u64,
}
