use crate::caller::Caller;
use crate::task::Task;

/// Listing predicate for a caller's visible set.
///
/// Non-superusers only ever see their own tasks; `include_deleted` widens
/// the set to soft-deleted records but never across owners. Superusers see
/// every owner's live tasks, and with `include_deleted` the whole store.
/// The unrestricted access path (every record, unconditionally) is the
/// store's plain read methods and is never routed to a caller.
pub fn visible_to(caller: &Caller, include_deleted: bool) -> impl Fn(&Task) -> bool + '_ {
    move |task: &Task| {
        if !caller.is_superuser && task.owner != caller.id {
            return false;
        }
        include_deleted || !task.is_deleted
    }
}
