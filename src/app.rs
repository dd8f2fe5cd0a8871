use axum::Router;

use crate::routes::{health, snapshot};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .merge(snapshot::router(state.options.variant))
        .with_state(state)
}
