use axum::{Router, routing::post};

use super::handlers::check_eligibility;

/// Stateless: usable under any router state.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/check", post(check_eligibility))
}
