use axum::{Router, extract::DefaultBodyLimit, routing::get};

use user_registry::{UPLOAD_MAX_BYTES, UserLifecycle};

use crate::user::{check_db, create_user, delete_user, get_user, list_users, update_user};

// Headroom over the photo ceiling for the other multipart fields, so an
// oversized photo reaches the policy check and gets a 413 instead of a
// generic body-limit rejection.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Router for the user CRUD API, intended to be nested under `/api`
pub fn user_registry_router(lifecycle: UserLifecycle) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/check-db", get(check_db))
        .layer(DefaultBodyLimit::max(*UPLOAD_MAX_BYTES + FORM_OVERHEAD_BYTES))
        .with_state(lifecycle)
}
