use serde::{Deserialize, Serialize};

/// Client priority bucket. Stored as TEXT in its wire spelling ("Prio 1").
#[derive(sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[sqlx(rename = "Prio 1")]
    #[serde(rename = "Prio 1")]
    Prio1,
    #[sqlx(rename = "Prio 2")]
    #[serde(rename = "Prio 2")]
    Prio2,
    #[sqlx(rename = "Prio 3")]
    #[serde(rename = "Prio 3")]
    Prio3,
    #[sqlx(rename = "Prio 4")]
    #[serde(rename = "Prio 4")]
    Prio4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Prio1,
        Priority::Prio2,
        Priority::Prio3,
        Priority::Prio4,
    ];
}

/// Discipline a person works in.
#[derive(sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trade {
    #[sqlx(rename = "UX")]
    #[serde(rename = "UX")]
    Ux,
    #[sqlx(rename = "UI")]
    #[serde(rename = "UI")]
    Ui,
    #[sqlx(rename = "FE-DEV")]
    #[serde(rename = "FE-DEV")]
    FeDev,
    #[sqlx(rename = "BE-DEV")]
    #[serde(rename = "BE-DEV")]
    BeDev,
    #[sqlx(rename = "PM")]
    #[serde(rename = "PM")]
    Pm,
    #[sqlx(rename = "TPM")]
    #[serde(rename = "TPM")]
    Tpm,
    #[sqlx(rename = "COPY")]
    #[serde(rename = "COPY")]
    Copy,
    #[sqlx(rename = "CREATIVE")]
    #[serde(rename = "CREATIVE")]
    Creative,
    #[sqlx(rename = "CONSULTANT")]
    #[serde(rename = "CONSULTANT")]
    Consultant,
    #[sqlx(rename = "OTHER")]
    #[serde(rename = "OTHER")]
    Other,
}

impl Trade {
    pub const ALL: [Trade; 10] = [
        Trade::Ux,
        Trade::Ui,
        Trade::FeDev,
        Trade::BeDev,
        Trade::Pm,
        Trade::Tpm,
        Trade::Copy,
        Trade::Creative,
        Trade::Consultant,
        Trade::Other,
    ];
}

/// Seniority tier.
#[derive(sqlx::Type, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[sqlx(rename = "JUNIOR")]
    #[serde(rename = "JUNIOR")]
    Junior,
    #[sqlx(rename = "MIDWEIGHT")]
    #[serde(rename = "MIDWEIGHT")]
    Midweight,
    #[sqlx(rename = "SENIOR")]
    #[serde(rename = "SENIOR")]
    Senior,
    #[sqlx(rename = "DIRECTOR")]
    #[serde(rename = "DIRECTOR")]
    Director,
    #[sqlx(rename = "C-LEVEL")]
    #[serde(rename = "C-LEVEL")]
    CLevel,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Junior,
        Level::Midweight,
        Level::Senior,
        Level::Director,
        Level::CLevel,
    ];
}

/// The fixed enumeration lists shipped alongside every dashboard snapshot.
/// These are static reference data, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticLists {
    pub priorities: Vec<Priority>,
    pub trades: Vec<Trade>,
    pub levels: Vec<Level>,
}

impl Default for StaticLists {
    fn default() -> Self {
        Self {
            priorities: Priority::ALL.to_vec(),
            trades: Trade::ALL.to_vec(),
            levels: Level::ALL.to_vec(),
        }
    }
}
