use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login_submit))
        .route("/logout", get(handlers::logout))
        .route("/aluno/:registration", get(handlers::student_profile))
        .route("/aluno/:registration/historico", get(handlers::student_history))
        .with_state(state)
}
