use serde::{Deserialize, Serialize};

/// A staffing link between a person and a (project, challenge) pair.
///
/// `quantity` is derived state: the percentage of the person's capacity this
/// assignment consumes. It is recomputed whenever the person's assignment set
/// changes and is never accepted from callers (bulk import excepted).
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub project_id: i64,
    pub challenge_id: i64,
    pub person_id: i64,
    pub is_owner: bool,
    pub is_leader: bool,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub project_id: i64,
    pub challenge_id: i64,
    pub person_id: i64,
    pub is_owner: bool,
    pub is_leader: bool,
}
