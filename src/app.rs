use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit", post(handlers::submit_form))
        .route("/entries/delete", post(handlers::delete_row))
        .route("/entries/edit", post(handlers::edit_row))
        .route("/api/entries", get(handlers::get_entries))
        .route("/api/form/:field", put(handlers::update_field))
        .route("/api/submit", post(handlers::submit))
        .route("/api/remove", post(handlers::remove))
        .route("/api/edit", post(handlers::edit))
        .with_state(state)
}
