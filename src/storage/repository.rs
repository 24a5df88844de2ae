//! Repository layer for database operations.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::domain::{is_storable_identifier, strip_leading_zeros, Student};
use crate::error::{AppError, AppResult};
use crate::storage::models::StudentRow;

const SELECT_COLUMNS: &str = "SELECT CAST(matricula AS TEXT) AS matricula, nombre, edad FROM alumnos";

/// Repository for all student database operations.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Clone)]
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl StudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` and verify it answers.
    pub async fn connect(url: &str, max_connections: u32) -> AppResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        let repository = Self::new(pool);
        repository.ping().await?;
        Ok(repository)
    }

    /// Run a trivial query to check the store is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }

    /// Close every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Initialize the database schema.
    pub async fn init_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS alumnos (
                matricula NUMERIC(8) NOT NULL PRIMARY KEY
                    CHECK (typeof(matricula) = 'integer' AND matricula BETWEEN 0 AND 99999999),
                nombre VARCHAR(20) NOT NULL CHECK (length(nombre) BETWEEN 1 AND 20),
                edad SMALLINT
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List up to `limit` students in store order.
    ///
    /// Identifiers come back in display form and null ages as 0. A failure
    /// anywhere yields the error, never a partial list.
    pub async fn list_students(&self, limit: i64) -> AppResult<Vec<Student>> {
        let rows: Vec<StudentRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} LIMIT ?"))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    /// Insert a new student. Duplicate identifiers are rejected by the primary key.
    ///
    /// Identifiers must be 1 to 8 digits. The column's CHECK cannot catch
    /// text such as `1e3`, which numeric affinity turns into `1000` first.
    pub async fn create_student(&self, student: &Student) -> AppResult<()> {
        if !is_storable_identifier(&student.identifier) {
            return Err(AppError::InvalidIdentifier(student.identifier.clone()));
        }

        sqlx::query("INSERT INTO alumnos (matricula, nombre, edad) VALUES (?, ?, ?)")
            .bind(&student.identifier)
            .bind(&student.name)
            .bind(student.age)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get a student by identifier, padded or not.
    pub async fn get_student(&self, identifier: &str) -> AppResult<Student> {
        let lookup = strip_leading_zeros(identifier);

        let row: StudentRow = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE matricula = ?"))
            .bind(lookup)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(identifier.to_string()))?;

        Ok(row.into())
    }

    /// Replace name and age of the student with the given identifier.
    pub async fn update_student(&self, student: &Student) -> AppResult<()> {
        let result = sqlx::query("UPDATE alumnos SET nombre = ?, edad = ? WHERE matricula = ?")
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.identifier)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected {
                operation: "update",
                identifier: student.identifier.clone(),
            });
        }

        Ok(())
    }

    /// Delete the student with the given identifier.
    pub async fn delete_student(&self, identifier: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM alumnos WHERE matricula = ?")
            .bind(identifier)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NoRowsAffected {
                operation: "delete",
                identifier: identifier.to_string(),
            });
        }

        Ok(())
    }
}
