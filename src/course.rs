//! Persister for [`Course`] rows stored in the `Courses` table.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{storage, PersistenceError, Result};
use crate::model::{Course, Id};
use crate::persist::CrudPersister;
use crate::sqlite;

const SELECT_COURSE: &str = "SELECT id, name, url FROM Courses";

/// CRUD access to courses over a borrowed connection.
pub struct CourseCrudPersister<'conn> {
    conn: &'conn Connection,
}

impl<'conn> CourseCrudPersister<'conn> {
    /// Bind to `conn`, switching on foreign-key enforcement so that deleting
    /// a course also removes its reviews.
    pub fn new(conn: &'conn Connection) -> Result<Self> {
        sqlite::configure(conn)?;
        Ok(Self { conn })
    }

    /// Return every course whose name contains `fragment` (case-sensitive).
    ///
    /// SQLite narrows the candidates with `instr`; the substring test is
    /// applied again to the fetched rows.
    pub fn list_by_name_contains(&self, fragment: &str) -> Result<Vec<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{SELECT_COURSE} WHERE instr(name, ?1) > 0 ORDER BY id"
            ))
            .map_err(storage("Unable to list courses"))?;
        let candidates = stmt
            .query_map(params![fragment], row_to_course)
            .map_err(storage("Unable to list courses"))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage("Unable to list courses"))?;

        let courses: Vec<Course> = candidates
            .into_iter()
            .filter(|course| course.name.contains(fragment))
            .collect();
        tracing::debug!(fragment, rows = courses.len(), "Listed courses by name");
        Ok(courses)
    }
}

impl CrudPersister<Course> for CourseCrudPersister<'_> {
    fn create(&self, course: &Course) -> Result<Course> {
        validate(course)?;
        self.conn
            .execute(
                "INSERT INTO Courses (name, url) VALUES (?1, ?2)",
                params![course.name, course.url],
            )
            .map_err(storage("Unable to create the course"))?;
        let id = self.conn.last_insert_rowid();

        tracing::debug!(id, name = %course.name, "Created course");
        Ok(course.clone().with_id(id))
    }

    fn read(&self, id: Id) -> Result<Option<Course>> {
        self.conn
            .query_row(
                &format!("{SELECT_COURSE} WHERE id = ?1"),
                params![id],
                row_to_course,
            )
            .optional()
            .map_err(storage("Unable to read the course"))
    }

    fn update(&self, course: &Course) -> Result<()> {
        validate(course)?;
        let changed = self
            .conn
            .execute(
                "UPDATE Courses SET name = ?1, url = ?2 WHERE id = ?3",
                params![course.name, course.url, course.id],
            )
            .map_err(storage("Unable to update the course"))?;
        if changed == 0 {
            tracing::warn!(id = course.id, "Update of missing course rejected");
            return Err(PersistenceError::not_found(format!(
                "No course with id {}",
                course.id
            )));
        }

        tracing::debug!(id = course.id, "Updated course");
        Ok(())
    }

    fn delete(&self, id: Id) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM Courses WHERE id = ?1", params![id])
            .map_err(storage("Unable to delete the course"))?;
        tracing::debug!(id, removed, "Deleted course");
        Ok(())
    }
}

fn validate(course: &Course) -> Result<()> {
    if course.name.trim().is_empty() {
        tracing::warn!(id = course.id, "Course without a name rejected");
        return Err(PersistenceError::invalid_input(
            "Course name must not be empty",
        ));
    }
    Ok(())
}

fn row_to_course(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
    })
}
