// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod list_tasks_query;
pub mod login_request;
pub mod user_add_request;


// Responses
pub mod task_response;
pub mod complete_task_response;
pub mod login_response;
pub mod user_get_response;
