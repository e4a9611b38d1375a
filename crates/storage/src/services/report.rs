use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::dto::common::{PaginatedResponse, PaginationParams};
use crate::dto::profile::{ProfileFilter, ProfileResponse};
use crate::dto::stats::{AgeStatistics, SignCount, StatsReport};
use crate::models::ProfileRecord;

pub const POPULAR_SIGNS_LIMIT: usize = 5;

/// Filters, orders newest first and slices one page of sanitized records.
pub fn paginate(
    records: Vec<ProfileRecord>,
    filter: &ProfileFilter,
    params: PaginationParams,
) -> PaginatedResponse<ProfileResponse> {
    let mut matching: Vec<ProfileRecord> = records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect();

    // sort_by is stable: records sharing a timestamp keep their input order
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total_count = matching.len() as u64;
    let skip = usize::try_from(params.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(params.limit()).unwrap_or(usize::MAX);

    let page = matching.into_iter().skip(skip).take(take).collect();

    page_of(page, params, total_count)
}

/// Wraps an already sliced page of records, hiding their origin metadata.
pub fn page_of(
    page: Vec<ProfileRecord>,
    params: PaginationParams,
    total_count: u64,
) -> PaginatedResponse<ProfileResponse> {
    let data = page.into_iter().map(ProfileResponse::from).collect();
    PaginatedResponse::new(data, params, total_count)
}

pub fn summarize(records: &[ProfileRecord]) -> StatsReport {
    let total_users = records.len() as u64;
    let eligible_users = records.iter().filter(|r| r.is_eligible).count() as u64;

    let mut gender_distribution = BTreeMap::new();
    for record in records {
        *gender_distribution
            .entry(record.gender.as_str().to_string())
            .or_insert(0) += 1;
    }

    StatsReport {
        total_users,
        eligible_users,
        eligibility_rate: eligibility_rate(eligible_users, total_users),
        gender_distribution,
        age_statistics: age_statistics(records),
        popular_signs: popular_signs(records),
    }
}

/// `eligible / total * 100`, rounded half away from zero to two places.
pub fn eligibility_rate(eligible: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let rate = Decimal::from(eligible) * Decimal::ONE_HUNDRED / Decimal::from(total);
    rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

fn age_statistics(records: &[ProfileRecord]) -> AgeStatistics {
    let ages = records.iter().map(|r| r.calculated_age);

    let (Some(min_age), Some(max_age)) = (ages.clone().min(), ages.clone().max()) else {
        return AgeStatistics::default();
    };

    let sum: i64 = ages.map(i64::from).sum();

    AgeStatistics {
        avg_age: sum as f64 / records.len() as f64,
        min_age,
        max_age,
    }
}

fn popular_signs(records: &[ProfileRecord]) -> Vec<SignCount> {
    let mut tallies: Vec<SignCount> = Vec::new();

    for sign in records.iter().filter_map(|r| r.astrological_sign) {
        match tallies.iter_mut().find(|t| t.sign == sign) {
            Some(tally) => tally.count += 1,
            None => tallies.push(SignCount { sign, count: 1 }),
        }
    }

    // Stable: equal counts stay in first-encounter order
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(POPULAR_SIGNS_LIMIT);
    tallies
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use super::*;
    use crate::models::{
        AstrologicalSign, BirthDate, ClientOrigin, Gender, Height, Weight,
    };

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn record(minutes: i64, gender: Gender, age: i32, eligible: bool) -> ProfileRecord {
        let created_at = base_time() + Duration::minutes(minutes);
        ProfileRecord {
            profile_id: Uuid::new_v4(),
            full_name: format!("Person {}", minutes),
            gender,
            date_of_birth: BirthDate::new(2024 - age, 1, 1),
            time_of_birth: None,
            birth_place: "Delhi".to_string(),
            height: Height::default(),
            weight: Weight::default(),
            astrological_sign: None,
            calculated_age: age,
            is_eligible: eligible,
            created_at,
            updated_at: created_at,
            origin: ClientOrigin {
                ip_address: Some("192.168.1.20".to_string()),
                user_agent: Some("Mozilla/5.0".to_string()),
            },
        }
    }

    fn with_sign(mut record: ProfileRecord, sign: AstrologicalSign) -> ProfileRecord {
        record.astrological_sign = Some(sign);
        record
    }

    #[test]
    fn test_summarize_empty() {
        let report = summarize(&[]);

        assert_eq!(report.total_users, 0);
        assert_eq!(report.eligible_users, 0);
        assert_eq!(report.eligibility_rate, 0.0);
        assert!(report.gender_distribution.is_empty());
        assert_eq!(report.age_statistics, AgeStatistics::default());
        assert!(report.popular_signs.is_empty());
    }

    #[test]
    fn test_summarize_empty_serializes_zeros() {
        let value = serde_json::to_value(summarize(&[])).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "totalUsers": 0,
                "eligibleUsers": 0,
                "eligibilityRate": 0.0,
                "genderDistribution": {},
                "ageStatistics": { "avgAge": 0.0, "minAge": 0, "maxAge": 0 },
                "popularSigns": []
            })
        );
    }

    #[test]
    fn test_eligibility_rate_rounds_to_two_places() {
        assert_eq!(eligibility_rate(3, 7), 42.86);
        assert_eq!(eligibility_rate(1, 3), 33.33);
        assert_eq!(eligibility_rate(2, 3), 66.67);
        assert_eq!(eligibility_rate(5, 5), 100.0);
    }

    #[test]
    fn test_summarize_counts_and_ages() {
        let records = vec![
            record(0, Gender::Male, 22, true),
            record(1, Gender::Female, 17, false),
            record(2, Gender::Female, 30, true),
            record(3, Gender::Male, 45, false),
        ];

        let report = summarize(&records);

        assert_eq!(report.total_users, 4);
        assert_eq!(report.eligible_users, 2);
        assert_eq!(report.eligibility_rate, 50.0);
        assert_eq!(report.gender_distribution.get("Male"), Some(&2));
        assert_eq!(report.gender_distribution.get("Female"), Some(&2));
        assert_eq!(report.age_statistics.min_age, 17);
        assert_eq!(report.age_statistics.max_age, 45);
        assert_eq!(report.age_statistics.avg_age, 28.5);
    }

    #[test]
    fn test_gender_distribution_only_lists_present_values() {
        let records = vec![record(0, Gender::Female, 25, true)];
        let report = summarize(&records);

        assert_eq!(report.gender_distribution.len(), 1);
        assert!(!report.gender_distribution.contains_key("Male"));
    }

    #[test]
    fn test_popular_signs_top_five_with_stable_ties() {
        use AstrologicalSign::*;

        let layout = [
            (Aries, 5),
            (Leo, 5),
            (Taurus, 3),
            (Gemini, 2),
            (Cancer, 1),
            (Virgo, 1),
        ];

        let mut records = Vec::new();
        for (sign, count) in layout {
            for _ in 0..count {
                let n = records.len() as i64;
                records.push(with_sign(record(n, Gender::Female, 25, true), sign));
            }
        }
        records.push(record(99, Gender::Male, 30, true));

        let signs = summarize(&records).popular_signs;

        assert_eq!(
            signs,
            vec![
                SignCount { sign: Aries, count: 5 },
                SignCount { sign: Leo, count: 5 },
                SignCount { sign: Taurus, count: 3 },
                SignCount { sign: Gemini, count: 2 },
                SignCount { sign: Cancer, count: 1 },
            ]
        );
    }

    #[test]
    fn test_popular_signs_tie_follows_encounter_order() {
        let records = vec![
            with_sign(record(0, Gender::Male, 25, true), AstrologicalSign::Leo),
            with_sign(record(1, Gender::Male, 25, true), AstrologicalSign::Aries),
            with_sign(record(2, Gender::Male, 25, true), AstrologicalSign::Aries),
            with_sign(record(3, Gender::Male, 25, true), AstrologicalSign::Leo),
        ];

        let signs = summarize(&records).popular_signs;
        assert_eq!(signs[0].sign, AstrologicalSign::Leo);
        assert_eq!(signs[1].sign, AstrologicalSign::Aries);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let records: Vec<_> = (0..25)
            .map(|n| record(n, Gender::Female, 25, true))
            .collect();

        let page = paginate(records, &ProfileFilter::default(), PaginationParams::new(3, 10));

        assert_eq!(page.data.len(), 5);
        assert_eq!(page.pagination.current_page, 3);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.total_count, 25);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
        // Newest first, so the last page holds the five oldest submissions
        assert_eq!(page.data[0].full_name, "Person 4");
        assert_eq!(page.data[4].full_name, "Person 0");
    }

    #[test]
    fn test_paginate_orders_newest_first() {
        let records = vec![
            record(5, Gender::Male, 25, true),
            record(20, Gender::Male, 25, true),
            record(10, Gender::Male, 25, true),
        ];

        let page = paginate(records, &ProfileFilter::default(), PaginationParams::default());
        let names: Vec<_> = page.data.iter().map(|p| p.full_name.as_str()).collect();

        assert_eq!(names, vec!["Person 20", "Person 10", "Person 5"]);
        assert!(!page.pagination.has_next);
        assert!(!page.pagination.has_prev);
    }

    #[test]
    fn test_paginate_age_range_is_inclusive() {
        let records = vec![
            record(0, Gender::Male, 24, true),
            record(1, Gender::Male, 25, true),
            record(2, Gender::Male, 35, true),
            record(3, Gender::Male, 36, true),
        ];
        let filter = ProfileFilter {
            min_age: Some(25),
            max_age: Some(35),
            ..Default::default()
        };

        let page = paginate(records, &filter, PaginationParams::default());
        let mut ages: Vec<_> = page.data.iter().map(|p| p.calculated_age).collect();
        ages.sort();

        assert_eq!(ages, vec![25, 35]);
        assert_eq!(page.pagination.total_count, 2);
    }

    #[test]
    fn test_paginate_combines_predicates() {
        let records = vec![
            with_sign(record(0, Gender::Female, 25, true), AstrologicalSign::Leo),
            with_sign(record(1, Gender::Female, 17, false), AstrologicalSign::Leo),
            with_sign(record(2, Gender::Male, 25, true), AstrologicalSign::Leo),
            with_sign(record(3, Gender::Female, 25, true), AstrologicalSign::Virgo),
        ];
        let filter = ProfileFilter {
            gender: Some(Gender::Female),
            astrological_sign: Some(AstrologicalSign::Leo),
            is_eligible: Some(true),
            ..Default::default()
        };

        let page = paginate(records, &filter, PaginationParams::default());

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].full_name, "Person 0");
    }

    #[test]
    fn test_paginate_strips_origin_metadata() {
        let records = vec![record(0, Gender::Male, 25, true)];
        let page = paginate(records, &ProfileFilter::default(), PaginationParams::default());

        let value = serde_json::to_value(&page.data[0]).unwrap();
        assert!(value.get("ipAddress").is_none());
        assert!(value.get("userAgent").is_none());
        assert!(value.get("origin").is_none());
        assert_eq!(value["calculatedAge"], 25);
    }

    #[test]
    fn test_paginate_page_past_end_is_empty() {
        let records: Vec<_> = (0..3).map(|n| record(n, Gender::Male, 25, true)).collect();
        let page = paginate(records, &ProfileFilter::default(), PaginationParams::new(5, 10));

        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_count, 3);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_paginate_min_age_only() {
        let records = vec![
            record(0, Gender::Male, 20, false),
            record(1, Gender::Male, 30, true),
            record(2, Gender::Male, 45, false),
        ];
        let filter = ProfileFilter {
            min_age: Some(30),
            ..Default::default()
        };

        let page = paginate(records, &filter, PaginationParams::default());
        let ages: Vec<_> = page.data.iter().map(|p| p.calculated_age).collect();

        assert_eq!(ages, vec![45, 30]);
    }

    #[test]
    fn test_paginate_max_age_only() {
        let records = vec![
            record(0, Gender::Male, 20, false),
            record(1, Gender::Male, 30, true),
            record(2, Gender::Male, 45, false),
        ];
        let filter = ProfileFilter {
            max_age: Some(30),
            ..Default::default()
        };

        let page = paginate(records, &filter, PaginationParams::default());
        let ages: Vec<_> = page.data.iter().map(|p| p.calculated_age).collect();

        assert_eq!(ages, vec![30, 20]);
    }

    #[test]
    fn test_paginate_ineligible_only() {
        let records = vec![
            record(0, Gender::Female, 17, false),
            record(1, Gender::Female, 25, true),
            record(2, Gender::Male, 41, false),
        ];
        let filter = ProfileFilter {
            is_eligible: Some(false),
            ..Default::default()
        };

        let page = paginate(records, &filter, PaginationParams::default());
        let names: Vec<_> = page.data.iter().map(|p| p.full_name.as_str()).collect();

        assert_eq!(names, vec!["Person 2", "Person 0"]);
        assert_eq!(page.pagination.total_count, 2);
    }

    #[test]
    fn test_page_of_keeps_database_total() {
        let page: Vec<_> = (0..10).map(|n| record(n, Gender::Male, 25, true)).collect();

        let response = page_of(page, PaginationParams::new(2, 10), 25);

        assert_eq!(response.data.len(), 10);
        assert_eq!(response.pagination.total_pages, 3);
        assert!(response.pagination.has_next);
        assert!(response.pagination.has_prev);
    }
}
