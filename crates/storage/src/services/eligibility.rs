use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::models::{BirthDate, Gender};

pub const MALE_MIN_AGE: i32 = 21;
pub const DEFAULT_MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 40;

/// Derived fields written alongside every profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub calculated_age: i32,
    pub is_eligible: bool,
}

/// Derivation plus the mutation timestamp, as applied on the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityStamp {
    pub eligibility: Eligibility,
    pub updated_at: NaiveDateTime,
}

/// Outcome of the pre-submission advisory check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeVerdict {
    Eligible,
    BelowMinimum { min_age: i32 },
    AboveMaximum { max_age: i32 },
}

impl AgeVerdict {
    pub fn message(&self, gender: Gender) -> Option<String> {
        match self {
            Self::Eligible => None,
            Self::BelowMinimum { min_age } => Some(format!(
                "Minimum age for {} is {} years",
                gender.as_str().to_lowercase(),
                min_age
            )),
            Self::AboveMaximum { max_age } => Some(format!(
                "Maximum age limit is {} years. Please visit our other site.",
                max_age
            )),
        }
    }

    /// Over-age submitters are sent elsewhere rather than asked to correct input.
    pub fn redirect(&self) -> bool {
        matches!(self, Self::AboveMaximum { .. })
    }
}

/// Whole years elapsed between `date_of_birth` and `reference`.
///
/// One year is taken off while the birthday anniversary has not yet been
/// reached in the reference year. Works on the raw month/day pair, so a
/// lenient date like February 31st compares as month 2, day 31.
pub fn completed_years(date_of_birth: &BirthDate, reference: NaiveDate) -> i32 {
    let years = reference.year() - date_of_birth.year;
    let birthday_pending = reference.month() < date_of_birth.month
        || (reference.month() == date_of_birth.month && reference.day() < date_of_birth.day);

    if birthday_pending { years - 1 } else { years }
}

pub fn minimum_age(gender: Gender) -> i32 {
    match gender {
        Gender::Male => MALE_MIN_AGE,
        Gender::Female => DEFAULT_MIN_AGE,
    }
}

pub fn derive(date_of_birth: &BirthDate, gender: Gender, reference: NaiveDate) -> Eligibility {
    let calculated_age = completed_years(date_of_birth, reference);
    let is_eligible = (minimum_age(gender)..=MAX_AGE).contains(&calculated_age);

    Eligibility {
        calculated_age,
        is_eligible,
    }
}

/// Default reference date: the server's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// [`derive`] against [`today`].
pub fn derive_now(date_of_birth: &BirthDate, gender: Gender) -> Eligibility {
    derive(date_of_birth, gender, today())
}

pub fn stamp(date_of_birth: &BirthDate, gender: Gender, now: NaiveDateTime) -> EligibilityStamp {
    EligibilityStamp {
        eligibility: derive(date_of_birth, gender, now.date()),
        updated_at: now,
    }
}

pub fn advise(
    date_of_birth: &BirthDate,
    gender: Gender,
    reference: NaiveDate,
) -> (Eligibility, AgeVerdict) {
    let eligibility = derive(date_of_birth, gender, reference);
    let min_age = minimum_age(gender);

    let verdict = if eligibility.calculated_age < min_age {
        AgeVerdict::BelowMinimum { min_age }
    } else if eligibility.calculated_age > MAX_AGE {
        AgeVerdict::AboveMaximum { max_age: MAX_AGE }
    } else {
        AgeVerdict::Eligible
    };

    (eligibility, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Birth date that is exactly `age` on 2024-06-15.
    fn born_aged(age: i32) -> BirthDate {
        BirthDate::new(2024 - age, 6, 15)
    }

    fn reference() -> NaiveDate {
        date(2024, 6, 15)
    }

    #[test]
    fn test_age_day_before_birthday() {
        let dob = BirthDate::new(2000, 3, 15);
        assert_eq!(completed_years(&dob, date(2024, 3, 14)), 23);
    }

    #[test]
    fn test_age_on_birthday() {
        let dob = BirthDate::new(2000, 3, 15);
        assert_eq!(completed_years(&dob, date(2024, 3, 15)), 24);
    }

    #[test]
    fn test_age_earlier_month_not_reached() {
        let dob = BirthDate::new(1990, 11, 2);
        assert_eq!(completed_years(&dob, date(2024, 10, 30)), 33);
        assert_eq!(completed_years(&dob, date(2024, 12, 1)), 34);
    }

    #[test]
    fn test_lenient_day_compares_raw_components() {
        let dob = BirthDate::new(2001, 2, 31);
        assert_eq!(completed_years(&dob, date(2024, 2, 29)), 22);
        assert_eq!(completed_years(&dob, date(2024, 3, 1)), 23);
    }

    #[test]
    fn test_male_boundaries() {
        let cases = [(20, false), (21, true), (40, true), (41, false)];
        for (age, expected) in cases {
            let result = derive(&born_aged(age), Gender::Male, reference());
            assert_eq!(result.calculated_age, age);
            assert_eq!(result.is_eligible, expected, "male aged {}", age);
        }
    }

    #[test]
    fn test_female_boundaries() {
        let cases = [(17, false), (18, true), (40, true), (41, false)];
        for (age, expected) in cases {
            let result = derive(&born_aged(age), Gender::Female, reference());
            assert_eq!(result.is_eligible, expected, "female aged {}", age);
        }
    }

    #[test]
    fn test_derive_now_matches_explicit_today() {
        let dob = BirthDate::new(1995, 1, 1);
        let before = today();
        let now = derive_now(&dob, Gender::Female);
        let after = today();

        // The clock may roll past midnight between the two reads
        assert!(
            now == derive(&dob, Gender::Female, before)
                || now == derive(&dob, Gender::Female, after)
        );
        assert!(now.calculated_age >= 29);
    }

    #[test]
    fn test_stamp_uses_timestamp_date() {
        let now = date(2024, 3, 15).and_hms_opt(23, 59, 0).unwrap();
        let stamped = stamp(&BirthDate::new(2000, 3, 15), Gender::Female, now);

        assert_eq!(stamped.eligibility.calculated_age, 24);
        assert!(stamped.eligibility.is_eligible);
        assert_eq!(stamped.updated_at, now);
    }

    #[test]
    fn test_advise_below_minimum() {
        let (eligibility, verdict) = advise(&born_aged(19), Gender::Male, reference());

        assert!(!eligibility.is_eligible);
        assert_eq!(verdict, AgeVerdict::BelowMinimum { min_age: 21 });
        assert_eq!(
            verdict.message(Gender::Male).as_deref(),
            Some("Minimum age for male is 21 years")
        );
        assert!(!verdict.redirect());
    }

    #[test]
    fn test_advise_above_maximum() {
        let (_, verdict) = advise(&born_aged(45), Gender::Female, reference());

        assert_eq!(verdict, AgeVerdict::AboveMaximum { max_age: 40 });
        assert_eq!(
            verdict.message(Gender::Female).as_deref(),
            Some("Maximum age limit is 40 years. Please visit our other site.")
        );
        assert!(verdict.redirect());
    }

    #[test]
    fn test_advise_eligible_has_no_message() {
        let (eligibility, verdict) = advise(&born_aged(30), Gender::Female, reference());

        assert!(eligibility.is_eligible);
        assert_eq!(verdict, AgeVerdict::Eligible);
        assert!(verdict.message(Gender::Female).is_none());
    }
}
