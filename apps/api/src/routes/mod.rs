pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::linkedin::handlers::handle_profile_data;
use crate::pipeline::handlers::{handle_custom_generate, handle_generate};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate", post(handle_generate))
        .route("/custom_generate", post(handle_custom_generate))
        .route("/linkedin_profile_data", post(handle_profile_data))
        .with_state(state)
}
