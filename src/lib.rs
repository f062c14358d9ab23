//! Resource planner core: clients, projects, challenges, people, and the
//! assignments staffing them, with each person's workload percentage
//! redistributed automatically whenever their assignment set changes.

pub mod config;
pub mod db;
pub mod models;
pub mod workload;
