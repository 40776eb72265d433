use uuid::Uuid;

use crate::caller::Caller;
use crate::create_task_request::CreateTaskRequest;
use crate::data_access::data_context::DataContext;
use crate::task::Task;
use crate::task_access::{error::TaskError, guard, visibility};
use crate::update_task_request::UpdateTaskRequest;

pub const COMPLETED_MESSAGE: &str = "Task marked as completed.";

fn validated_title(title: String) -> Result<String, TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::Validation("Title must not be empty.".to_string()));
    }
    Ok(title)
}

/// Create a task owned by the caller. Both flags start false and both
/// timestamps are stamped to the same instant.
pub fn create(
    ctx: &DataContext,
    caller: &Caller,
    request: CreateTaskRequest,
) -> Result<Task, TaskError> {
    let task = Task::new(validated_title(request.title)?, caller.id);
    ctx.create_task(&task)?;
    tracing::info!(task_id = %task.id, owner = %task.owner, "task created");
    Ok(task)
}

/// The caller's visible set, most recently created first.
pub fn list(
    ctx: &DataContext,
    caller: &Caller,
    include_deleted: bool,
) -> Result<Vec<Task>, TaskError> {
    let visible = visibility::visible_to(caller, include_deleted);
    let tasks = ctx.list_tasks()?;
    Ok(tasks.into_iter().filter(|t| visible(t)).collect())
}

pub fn retrieve(ctx: &DataContext, caller: &Caller, id: Uuid) -> Result<Task, TaskError> {
    let task = ctx.get_task(id)?.ok_or(TaskError::NotFound)?;
    guard::check_target(caller, &task)?;
    Ok(task)
}

/// Apply field changes under the caller's scope. The owner is never
/// rewritten, not even by a superuser acting on a foreign task.
pub fn update(
    ctx: &DataContext,
    caller: &Caller,
    id: Uuid,
    request: UpdateTaskRequest,
) -> Result<Task, TaskError> {
    let updated = ctx.modify_task(id, |task| {
        guard::check_target(caller, task)?;
        if let Some(title) = request.title {
            task.title = validated_title(title)?;
        }
        if let Some(is_completed) = request.is_completed {
            task.is_completed = is_completed;
        }
        Ok(())
    })?;
    tracing::info!(task_id = %updated.id, "task updated");
    Ok(updated)
}

/// Mark the record deleted. The flag is absorbing: once set, the record no
/// longer resolves through the guard, so a repeat call surfaces as
/// `NotFound` rather than a no-op success.
pub fn soft_delete(ctx: &DataContext, caller: &Caller, id: Uuid) -> Result<(), TaskError> {
    let deleted = ctx.modify_task(id, |task| {
        guard::check_target(caller, task)?;
        task.is_deleted = true;
        Ok(())
    })?;
    tracing::info!(task_id = %deleted.id, "task soft-deleted");
    Ok(())
}

/// Transition `is_completed` from false to true. Completing an already
/// completed task is refused with `AlreadyCompleted`, not treated as a
/// success.
pub fn complete(ctx: &DataContext, caller: &Caller, id: Uuid) -> Result<Task, TaskError> {
    let completed = ctx.modify_task(id, |task| {
        guard::check_target(caller, task)?;
        if task.is_completed {
            return Err(TaskError::AlreadyCompleted);
        }
        task.is_completed = true;
        Ok(())
    })?;
    tracing::info!(task_id = %completed.id, "task completed");
    Ok(completed)
}
