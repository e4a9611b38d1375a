use storage::{
    dto::profile::{EligibilityCheckRequest, EligibilityCheckResponse},
    services::eligibility,
};

/// Advisory check run before submission; nothing is persisted
pub fn check_eligibility(request: &EligibilityCheckRequest) -> EligibilityCheckResponse {
    let reference = request.reference_date.unwrap_or_else(eligibility::today);
    let (result, verdict) = eligibility::advise(&request.date_of_birth, request.gender, reference);

    EligibilityCheckResponse {
        calculated_age: result.calculated_age,
        is_eligible: result.is_eligible,
        min_age: eligibility::minimum_age(request.gender),
        max_age: eligibility::MAX_AGE,
        message: verdict.message(request.gender),
        redirect: verdict.redirect(),
    }
}
