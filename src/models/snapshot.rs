use serde::{Deserialize, Serialize};

use super::{Assignment, Challenge, Client, Person, Project, StaticLists};

/// Full read of the store: every collection in its listing order plus the
/// static enumeration lists. The same shape serves the dashboard and the
/// export/import round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub people: Vec<Person>,
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub challenges: Vec<Challenge>,
    pub assignments: Vec<Assignment>,
    #[serde(rename = "staticLists", default)]
    pub static_lists: StaticLists,
}
