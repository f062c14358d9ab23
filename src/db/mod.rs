use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{
    Assignment, AssignmentInput, Challenge, ChallengeInput, Client, ClientInput, Person,
    PersonInput, Project, ProjectInput, Snapshot, StaticLists,
};
use crate::workload;

/// Failure modes surfaced by the store.
///
/// Integrity failures are detected by SQLite's constraint enforcement and
/// mapped here; nothing is pre-validated in application code. Every failing
/// mutation rolls back, so no partial write ever commits.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("referenced entity does not exist")]
    ForeignKey,
    #[error("challenge already has an assignment")]
    ChallengeTaken,
    #[error("no such entity")]
    NotFound,
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation => return DbError::ForeignKey,
                ErrorKind::UniqueViolation => return DbError::ChallengeTaken,
                _ => {}
            }
        }
        DbError::Sqlx(err)
    }
}

/// Database connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(config.database_url())?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    /// Create an ephemeral in-memory store, one isolated instance per call.
    pub async fn in_memory() -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // A second pool connection would see a different empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;

        Ok(db)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS clients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                location TEXT NOT NULL,
                since TEXT NOT NULL,
                priority TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                client_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT,
                budget_eur REAL NOT NULL,
                FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE CASCADE
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS challenges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                FOREIGN KEY(project_id) REFERENCES projects(id) ON DELETE CASCADE
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS people (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                trade TEXT NOT NULL,
                level TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS assignments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER NOT NULL,
                challenge_id INTEGER NOT NULL UNIQUE,
                person_id INTEGER NOT NULL,
                is_owner INTEGER NOT NULL DEFAULT 0,
                is_leader INTEGER NOT NULL DEFAULT 0,
                quantity INTEGER NOT NULL DEFAULT 100,
                FOREIGN KEY(project_id) REFERENCES projects(id) ON DELETE CASCADE,
                FOREIGN KEY(challenge_id) REFERENCES challenges(id) ON DELETE CASCADE,
                FOREIGN KEY(person_id) REFERENCES people(id) ON DELETE CASCADE
            )",
        )
        .execute(&self.pool)
        .await?;

        debug!("database schema initialized");

        Ok(())
    }

    /// Full read of the store: every collection in its listing order plus the
    /// static enumeration lists.
    pub async fn dashboard(&self) -> Result<Snapshot, DbError> {
        let people =
            sqlx::query_as::<_, Person>("SELECT * FROM people ORDER BY last_name, first_name")
                .fetch_all(&self.pool)
                .await?;

        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let challenges = sqlx::query_as::<_, Challenge>("SELECT * FROM challenges ORDER BY title")
            .fetch_all(&self.pool)
            .await?;

        let assignments = sqlx::query_as::<_, Assignment>("SELECT * FROM assignments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(Snapshot {
            people,
            clients,
            projects,
            challenges,
            assignments,
            static_lists: StaticLists::default(),
        })
    }

    // Person operations

    pub async fn create_person(&self, input: &PersonInput) -> Result<Person, DbError> {
        let result = sqlx::query(
            "INSERT INTO people (first_name, last_name, trade, level) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.trade)
        .bind(input.level)
        .execute(&self.pool)
        .await?;

        self.get_person(result.last_insert_rowid()).await
    }

    pub async fn update_person(&self, id: i64, input: &PersonInput) -> Result<Person, DbError> {
        let result = sqlx::query(
            "UPDATE people SET first_name = ?, last_name = ?, trade = ?, level = ? WHERE id = ?",
        )
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.trade)
        .bind(input.level)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_person(id).await
    }

    /// Delete a person. Their assignments cascade away with them, so there is
    /// no one left to rebalance.
    pub async fn delete_person(&self, id: i64) -> Result<(), DbError> {
        sqlx::query("DELETE FROM people WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_person(&self, id: i64) -> Result<Person, DbError> {
        sqlx::query_as::<_, Person>("SELECT * FROM people WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // Client operations

    pub async fn create_client(&self, input: &ClientInput) -> Result<Client, DbError> {
        let result = sqlx::query(
            "INSERT INTO clients (name, location, since, priority) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.since)
        .bind(input.priority)
        .execute(&self.pool)
        .await?;

        self.get_client(result.last_insert_rowid()).await
    }

    pub async fn update_client(&self, id: i64, input: &ClientInput) -> Result<Client, DbError> {
        let result = sqlx::query(
            "UPDATE clients SET name = ?, location = ?, since = ?, priority = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.since)
        .bind(input.priority)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_client(id).await
    }

    /// Delete a client and, via the foreign-key cascades, its projects, their
    /// challenges, and any assignments on those. Everyone who lost an
    /// assignment this way gets their remaining quantities rebalanced within
    /// the same transaction.
    pub async fn delete_client(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        // An assignment is lost to the cascade when either of its two
        // foreign keys reaches the doomed client, so collect along both.
        let affected: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT person_id FROM assignments
             WHERE project_id IN (SELECT id FROM projects WHERE client_id = ?)
                OR challenge_id IN (
                    SELECT c.id FROM challenges c
                    JOIN projects p ON p.id = c.project_id
                    WHERE p.client_id = ?)",
        )
        .bind(id)
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for person_id in affected {
            workload::recompute_person(&mut tx, person_id).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_client(&self, id: i64) -> Result<Client, DbError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // Project operations

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, DbError> {
        let result = sqlx::query(
            "INSERT INTO projects (client_id, name, start_date, end_date, budget_eur)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.client_id)
        .bind(&input.name)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.budget_eur)
        .execute(&self.pool)
        .await?;

        self.get_project(result.last_insert_rowid()).await
    }

    pub async fn update_project(&self, id: i64, input: &ProjectInput) -> Result<Project, DbError> {
        let result = sqlx::query(
            "UPDATE projects SET client_id = ?, name = ?, start_date = ?, end_date = ?, budget_eur = ?
             WHERE id = ?",
        )
        .bind(input.client_id)
        .bind(&input.name)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.budget_eur)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_project(id).await
    }

    /// Delete a project; its challenges and their assignments cascade away.
    /// Every person who lost an assignment is rebalanced in the same
    /// transaction.
    pub async fn delete_project(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        // Assignments cascade through both their project_id and their
        // challenge_id, and nothing ties the two to the same project, so
        // collect the affected people along both paths.
        let affected: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT person_id FROM assignments
             WHERE project_id = ?
                OR challenge_id IN (SELECT id FROM challenges WHERE project_id = ?)",
        )
        .bind(id)
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for person_id in affected {
            workload::recompute_person(&mut tx, person_id).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_project(&self, id: i64) -> Result<Project, DbError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // Challenge operations

    pub async fn create_challenge(&self, input: &ChallengeInput) -> Result<Challenge, DbError> {
        let result = sqlx::query(
            "INSERT INTO challenges (project_id, title, description) VALUES (?, ?, ?)",
        )
        .bind(input.project_id)
        .bind(&input.title)
        .bind(&input.description)
        .execute(&self.pool)
        .await?;

        self.get_challenge(result.last_insert_rowid()).await
    }

    pub async fn update_challenge(
        &self,
        id: i64,
        input: &ChallengeInput,
    ) -> Result<Challenge, DbError> {
        let result = sqlx::query(
            "UPDATE challenges SET project_id = ?, title = ?, description = ? WHERE id = ?",
        )
        .bind(input.project_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_challenge(id).await
    }

    /// Delete a challenge; its assignment (if any) cascades away and the
    /// assigned person is rebalanced in the same transaction.
    pub async fn delete_challenge(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let affected: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT person_id FROM assignments WHERE challenge_id = ?",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM challenges WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for person_id in affected {
            workload::recompute_person(&mut tx, person_id).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_challenge(&self, id: i64) -> Result<Challenge, DbError> {
        sqlx::query_as::<_, Challenge>("SELECT * FROM challenges WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    // Assignment operations

    /// Insert an assignment and rebalance the assignee's quantities, as one
    /// transaction. The inserted quantity is a placeholder; the rebalance
    /// overwrites it before anything becomes visible.
    pub async fn create_assignment(&self, input: &AssignmentInput) -> Result<Assignment, DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO assignments (project_id, challenge_id, person_id, is_owner, is_leader)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.project_id)
        .bind(input.challenge_id)
        .bind(input.person_id)
        .bind(input.is_owner)
        .bind(input.is_leader)
        .execute(&mut *tx)
        .await?;

        workload::recompute_person(&mut tx, input.person_id).await?;

        let assignment = sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
            .bind(result.last_insert_rowid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(assignment)
    }

    /// Update an assignment and rebalance the new assignee. When the
    /// assignment moved between people, the previous assignee is rebalanced
    /// too, so both sets re-sum to 100.
    pub async fn update_assignment(
        &self,
        id: i64,
        input: &AssignmentInput,
    ) -> Result<Assignment, DbError> {
        let mut tx = self.pool.begin().await?;

        let previous = sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound)?;

        sqlx::query(
            "UPDATE assignments SET project_id = ?, challenge_id = ?, person_id = ?, is_owner = ?, is_leader = ?
             WHERE id = ?",
        )
        .bind(input.project_id)
        .bind(input.challenge_id)
        .bind(input.person_id)
        .bind(input.is_owner)
        .bind(input.is_leader)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        workload::recompute_person(&mut tx, input.person_id).await?;
        if previous.person_id != input.person_id {
            workload::recompute_person(&mut tx, previous.person_id).await?;
        }

        let assignment = sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(assignment)
    }

    /// Delete an assignment and rebalance the person who held it. Deleting a
    /// nonexistent id is a no-op.
    pub async fn delete_assignment(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let Some(previous) =
            sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(());
        };

        sqlx::query("DELETE FROM assignments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        workload::recompute_person(&mut tx, previous.person_id).await?;

        tx.commit().await?;

        Ok(())
    }

    // Snapshot operations

    /// Snapshot of the entire store, identical in shape to the dashboard.
    pub async fn export_state(&self) -> Result<Snapshot, DbError> {
        self.dashboard().await
    }

    /// Replace the entire store with the snapshot's rows, preserving their
    /// original identifiers. This is a full replace, not a merge, and the
    /// imported quantities are trusted verbatim; no rebalancing runs.
    pub async fn import_state(&self, snapshot: &Snapshot) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        // Children first so the deletes never trip a foreign key.
        for table in ["assignments", "challenges", "projects", "clients", "people"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }

        for person in &snapshot.people {
            sqlx::query(
                "INSERT INTO people (id, first_name, last_name, trade, level)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(person.id)
            .bind(&person.first_name)
            .bind(&person.last_name)
            .bind(person.trade)
            .bind(person.level)
            .execute(&mut *tx)
            .await?;
        }

        for client in &snapshot.clients {
            sqlx::query(
                "INSERT INTO clients (id, name, location, since, priority)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(client.id)
            .bind(&client.name)
            .bind(&client.location)
            .bind(&client.since)
            .bind(client.priority)
            .execute(&mut *tx)
            .await?;
        }

        for project in &snapshot.projects {
            sqlx::query(
                "INSERT INTO projects (id, client_id, name, start_date, end_date, budget_eur)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(project.id)
            .bind(project.client_id)
            .bind(&project.name)
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(project.budget_eur)
            .execute(&mut *tx)
            .await?;
        }

        for challenge in &snapshot.challenges {
            sqlx::query(
                "INSERT INTO challenges (id, project_id, title, description)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(challenge.id)
            .bind(challenge.project_id)
            .bind(&challenge.title)
            .bind(&challenge.description)
            .execute(&mut *tx)
            .await?;
        }

        for assignment in &snapshot.assignments {
            sqlx::query(
                "INSERT INTO assignments (id, project_id, challenge_id, person_id, is_owner, is_leader, quantity)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(assignment.id)
            .bind(assignment.project_id)
            .bind(assignment.challenge_id)
            .bind(assignment.person_id)
            .bind(assignment.is_owner)
            .bind(assignment.is_leader)
            .bind(assignment.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            people = snapshot.people.len(),
            clients = snapshot.clients.len(),
            projects = snapshot.projects.len(),
            challenges = snapshot.challenges.len(),
            assignments = snapshot.assignments.len(),
            "store replaced from snapshot"
        );

        Ok(())
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database, DbError> {
    let db = Database::new(config).await?;

    Ok(db)
}
