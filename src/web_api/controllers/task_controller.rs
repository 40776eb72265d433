use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::{
    app_state::SharedState, caller::Caller, complete_task_response::CompleteTaskResponse,
    create_task_request::CreateTaskRequest, list_tasks_query::ListTasksQuery,
    task_access::{error::TaskError, lifecycle},
    task_response::TaskResponse, update_task_request::UpdateTaskRequest,
};

pub struct TaskController {}

impl TaskController {
    // GET /api/tasks?include_deleted=bool
    pub async fn list(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Query(query): Query<ListTasksQuery>,
    ) -> Result<Json<Vec<TaskResponse>>, TaskError> {
        let tasks = lifecycle::list(&state.data_context, &caller, query.include_deleted)?;
        Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
    }

    // POST /api/tasks
    pub async fn create(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Json(body): Json<CreateTaskRequest>,
    ) -> Result<(StatusCode, Json<TaskResponse>), TaskError> {
        let task = lifecycle::create(&state.data_context, &caller, body)?;
        Ok((StatusCode::CREATED, Json(task.into())))
    }

    // GET /api/tasks/:id
    pub async fn retrieve(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Path(id): Path<Uuid>,
    ) -> Result<Json<TaskResponse>, TaskError> {
        let task = lifecycle::retrieve(&state.data_context, &caller, id)?;
        Ok(Json(task.into()))
    }

    // PUT/PATCH /api/tasks/:id
    pub async fn update(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Path(id): Path<Uuid>,
        Json(body): Json<UpdateTaskRequest>,
    ) -> Result<Json<TaskResponse>, TaskError> {
        let task = lifecycle::update(&state.data_context, &caller, id, body)?;
        Ok(Json(task.into()))
    }

    // DELETE /api/tasks/:id
    pub async fn soft_delete(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Path(id): Path<Uuid>,
    ) -> Result<StatusCode, TaskError> {
        lifecycle::soft_delete(&state.data_context, &caller, id)?;
        Ok(StatusCode::NO_CONTENT)
    }

    // PATCH /api/tasks/:id/complete
    pub async fn complete(
        State(state): State<SharedState>,
        Extension(caller): Extension<Caller>,
        Path(id): Path<Uuid>,
    ) -> Result<Json<CompleteTaskResponse>, TaskError> {
        let task = lifecycle::complete(&state.data_context, &caller, id)?;
        Ok(Json(CompleteTaskResponse {
            message: lifecycle::COMPLETED_MESSAGE.to_string(),
            task: task.into(),
        }))
    }
}
