use crate::caller::Caller;
use crate::task::Task;
use crate::task_access::error::TaskError;

/// Decides whether an id-scoped operation may target this record.
///
/// A soft-deleted record never resolves, and a foreign record only resolves
/// for a superuser. Every refusal is `NotFound`: the outward signal never
/// distinguishes "exists but belongs to someone else" from "does not
/// exist", so ids cannot be enumerated across owners. Write permission
/// falls out of the same narrowing, there is no separate check after the
/// fetch.
pub fn check_target(caller: &Caller, task: &Task) -> Result<(), TaskError> {
    if task.is_deleted {
        return Err(TaskError::NotFound);
    }
    if !caller.is_superuser && task.owner != caller.id {
        return Err(TaskError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn owner_may_target_own_live_task() {
        let caller = Caller { id: Uuid::new_v4(), is_superuser: false };
        let task = Task::new("t".to_string(), caller.id);
        assert!(check_target(&caller, &task).is_ok());
    }

    #[test]
    fn foreign_task_resolves_as_not_found() {
        let caller = Caller { id: Uuid::new_v4(), is_superuser: false };
        let task = Task::new("t".to_string(), Uuid::new_v4());
        assert!(matches!(check_target(&caller, &task), Err(TaskError::NotFound)));
    }

    #[test]
    fn superuser_may_target_any_live_task() {
        let caller = Caller { id: Uuid::new_v4(), is_superuser: true };
        let task = Task::new("t".to_string(), Uuid::new_v4());
        assert!(check_target(&caller, &task).is_ok());
    }

    #[test]
    fn deleted_task_resolves_as_not_found_even_for_superuser() {
        let caller = Caller { id: Uuid::new_v4(), is_superuser: true };
        let mut task = Task::new("t".to_string(), Uuid::new_v4());
        task.is_deleted = true;
        assert!(matches!(check_target(&caller, &task), Err(TaskError::NotFound)));
    }
}
