use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default)]
    pub include_deleted: bool,
}
