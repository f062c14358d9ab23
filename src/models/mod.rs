mod assignment;
mod challenge;
mod client;
mod enums;
mod person;
mod project;
mod snapshot;

pub use assignment::{Assignment, AssignmentInput};
pub use challenge::{Challenge, ChallengeInput};
pub use client::{Client, ClientInput};
pub use enums::{Level, Priority, StaticLists, Trade};
pub use person::{Person, PersonInput};
pub use project::{Project, ProjectInput};
pub use snapshot::Snapshot;
