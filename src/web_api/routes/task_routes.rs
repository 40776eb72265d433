use std::sync::Arc;
use axum::{Router, middleware, routing::{get, patch}};
use crate::{app_state::AppState, authentication::auth::auth_middleware, task_controller::TaskController};

pub const ROUTER_PATH: &str = "/api/tasks";

pub fn get_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            ROUTER_PATH,
            get(TaskController::list).post(TaskController::create),
        )
        .route(
            format!("{}/:id", ROUTER_PATH).as_str(),
            get(TaskController::retrieve)
                .put(TaskController::update)
                .patch(TaskController::update)
                .delete(TaskController::soft_delete),
        )
        .route(
            format!("{}/:id/complete", ROUTER_PATH).as_str(),
            patch(TaskController::complete),
        )
        .layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
