use serde::{Deserialize, Serialize};

use super::Priority;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub since: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInput {
    pub name: String,
    pub location: String,
    pub since: String,
    pub priority: Priority,
}
