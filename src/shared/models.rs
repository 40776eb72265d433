pub mod app_state;
pub mod caller;
pub mod settings;
pub mod task;
pub mod user;
