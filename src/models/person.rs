use serde::{Deserialize, Serialize};

use super::{Level, Trade};

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub trade: Trade,
    pub level: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    pub first_name: String,
    pub last_name: String,
    pub trade: Trade,
    pub level: Level,
}
