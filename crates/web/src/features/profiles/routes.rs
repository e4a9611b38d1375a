use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_profile, delete_profile, get_profile, list_profiles, update_profile};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route(
            "/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}
