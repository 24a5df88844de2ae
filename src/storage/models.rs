//! Database models for the student registry.
//!
//! These are the row types returned by SQLx queries.

use sqlx::FromRow;

use crate::domain::{pad_to_display, Student};

/// Database row for the alumnos table.
///
/// `matricula` is selected as `CAST(matricula AS TEXT)`: the column has numeric
/// affinity, so numeric identifiers come back without their padding.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub matricula: String,
    pub nombre: String,
    pub edad: Option<i16>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            identifier: pad_to_display(&row.matricula),
            name: row.nombre,
            age: row.edad.unwrap_or(0),
        }
    }
}
