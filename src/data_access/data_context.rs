use redb::{Database, ReadableTable, TableDefinition};
use std::{error::Error, sync::Arc};
use uuid::Uuid;

use crate::{
    settings::Settings, task::Task, task_access::error::TaskError, user::User,
    user_add_request::UserAddRequest,
};

const USERS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("users");
const USERNAME_INDEX: TableDefinition<&str, &[u8]> = TableDefinition::new("username_index");
const TASKS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("tasks");

/// redb-backed record store. Task rows are only ever inserted or rewritten;
/// no code path removes one, soft delete is a flag flip like any other
/// mutation.
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    pub fn new(path: &str) -> Result<Self, redb::Error> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        let _ = write_txn.open_table(USERS_TABLE)?;
        let _ = write_txn.open_table(TASKS_TABLE)?;
        let _ = write_txn.open_table(USERNAME_INDEX)?;
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }

    // USERS
    pub fn create_user(&self, user: &User) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut users_table = write_txn.open_table(USERS_TABLE)?;
            let mut username_index = write_txn.open_table(USERNAME_INDEX)?;
            let user_bytes = serde_json::to_vec(user).unwrap();
            let id_bytes = user.id.as_bytes();
            users_table.insert(id_bytes.as_slice(), user_bytes.as_slice())?;
            username_index.insert(user.username.as_str(), id_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        let id_bytes = id.as_bytes();
        match users_table.get(id_bytes.as_slice())? {
            Some(data) => {
                let user: User = serde_json::from_slice(data.value()).unwrap();
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let username_index = read_txn.open_table(USERNAME_INDEX)?;

        match username_index.get(username)? {
            Some(id_data) => {
                let users_table = read_txn.open_table(USERS_TABLE)?;
                match users_table.get(id_data.value())? {
                    Some(user_data) => {
                        let user: User = serde_json::from_slice(user_data.value()).unwrap();
                        Ok(Some(user))
                    }
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }

    pub fn list_users(&self) -> Result<Vec<User>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;

        let mut users = Vec::new();
        for entry in users_table.iter()? {
            let (_, value) = entry?;
            let user: User = serde_json::from_slice(value.value()).unwrap();
            users.push(user);
        }
        Ok(users)
    }

    // Initialize with a default superuser if no users exist
    pub fn ensure_default_user(&self, settings: &Settings) -> Result<bool, Box<dyn Error>> {
        let users = self.list_users()?;
        if users.is_empty() {
            let default_user_creation_request = UserAddRequest {
                password: settings.default_admin_password.clone(),
                username: settings.default_admin_username.clone(),
                email: settings.default_admin_email.clone(),
                is_superuser: true,
            };
            let default_admin = User::new(default_user_creation_request);
            self.create_user(&default_admin)?;
            return Ok(true);
        }
        Ok(false)
    }

    // TASKS
    pub fn create_task(&self, task: &Task) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let task_bytes = serde_json::to_vec(task).unwrap();
            let id_bytes = task.id.as_bytes();
            tasks_table.insert(id_bytes.as_slice(), task_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Point read by id with no caller scoping. This is the unrestricted
    /// "all records" path; request handling only reaches it through the
    /// guard, which re-checks visibility on the returned record.
    pub fn get_task(&self, id: Uuid) -> Result<Option<Task>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let id_bytes = id.as_bytes();
        match tasks_table.get(id_bytes.as_slice())? {
            Some(data) => {
                let task: Task = serde_json::from_slice(data.value()).unwrap();
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    /// Every task row, soft-deleted ones included, sorted by `created_at`
    /// descending. Request handling narrows this with a visibility
    /// predicate before anything leaves the process.
    pub fn list_tasks(&self) -> Result<Vec<Task>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let mut tasks = Vec::new();
        for entry in tasks_table.iter()? {
            let (_, value) = entry?;
            let task: Task = serde_json::from_slice(value.value()).unwrap();
            tasks.push(task);
        }

        // Sort by created_at descending
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    /// Atomic single-row read-modify-write: the read, the closure, the
    /// `updated_at` refresh, and the rewrite all happen inside one write
    /// transaction, so two concurrent mutations of the same task cannot
    /// lose an update. A closure error aborts the transaction; a missing
    /// row is `NotFound`.
    pub fn modify_task<F>(&self, id: Uuid, apply: F) -> Result<Task, TaskError>
    where
        F: FnOnce(&mut Task) -> Result<(), TaskError>,
    {
        let write_txn = self.db.begin_write()?;
        let task = {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let id_bytes = id.as_bytes();

            let mut task: Task = match tasks_table.get(id_bytes.as_slice())? {
                Some(data) => serde_json::from_slice(data.value()).unwrap(),
                None => return Err(TaskError::NotFound),
            };

            apply(&mut task)?;
            task.updated_at = chrono::Utc::now();

            let task_bytes = serde_json::to_vec(&task).unwrap();
            tasks_table.insert(id_bytes.as_slice(), task_bytes.as_slice())?;
            task
        };
        write_txn.commit()?;
        Ok(task)
    }
}
