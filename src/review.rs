//! Persister for [`Review`] rows stored in the `Reviews` table.
//!
//! `Reviews.courseId` is a foreign key into `Courses`; SQLite rejects orphan
//! reviews on insert and update, and the rejection surfaces as a
//! [`PersistenceErrorKind::ConstraintViolation`](crate::PersistenceErrorKind::ConstraintViolation).

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{storage, PersistenceError, Result};
use crate::model::{Id, Review};
use crate::persist::CrudPersister;
use crate::sqlite;

const SELECT_REVIEW: &str = "SELECT id, courseId, rating, comment FROM Reviews";

/// CRUD access to reviews over a borrowed connection.
pub struct ReviewCrudPersister<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ReviewCrudPersister<'conn> {
    /// Bind to `conn`, switching on foreign-key enforcement for it.
    pub fn new(conn: &'conn Connection) -> Result<Self> {
        sqlite::configure(conn)?;
        Ok(Self { conn })
    }

    /// Return every review attached to `course_id`.
    pub fn list_by_course_id(&self, course_id: Id) -> Result<Vec<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_REVIEW} WHERE courseId = ?1 ORDER BY id"))
            .map_err(storage("Unable to list reviews"))?;
        let reviews = stmt
            .query_map(params![course_id], row_to_review)
            .map_err(storage("Unable to list reviews"))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage("Unable to list reviews"))?;

        tracing::debug!(course_id, rows = reviews.len(), "Listed reviews by course");
        Ok(reviews)
    }
}

impl CrudPersister<Review> for ReviewCrudPersister<'_> {
    fn create(&self, review: &Review) -> Result<Review> {
        self.conn
            .execute(
                "INSERT INTO Reviews (courseId, rating, comment) VALUES (?1, ?2, ?3)",
                params![review.course_id, review.rating, review.comment],
            )
            .map_err(|err| {
                tracing::warn!(course_id = review.course_id, error = %err, "Review insert rejected");
                PersistenceError::from_rusqlite("Unable to create the review", err)
            })?;
        let id = self.conn.last_insert_rowid();

        tracing::debug!(id, course_id = review.course_id, "Created review");
        Ok(review.clone().with_id(id))
    }

    fn read(&self, id: Id) -> Result<Option<Review>> {
        self.conn
            .query_row(
                &format!("{SELECT_REVIEW} WHERE id = ?1"),
                params![id],
                row_to_review,
            )
            .optional()
            .map_err(storage("Unable to read the review"))
    }

    fn update(&self, review: &Review) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE Reviews SET courseId = ?1, rating = ?2, comment = ?3 WHERE id = ?4",
                params![review.course_id, review.rating, review.comment, review.id],
            )
            .map_err(storage("Unable to update the review"))?;
        if changed == 0 {
            tracing::warn!(id = review.id, "Update of missing review rejected");
            return Err(PersistenceError::not_found(format!(
                "No review with id {}",
                review.id
            )));
        }

        tracing::debug!(id = review.id, "Updated review");
        Ok(())
    }

    fn delete(&self, id: Id) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM Reviews WHERE id = ?1", params![id])
            .map_err(storage("Unable to delete the review"))?;
        tracing::debug!(id, removed, "Deleted review");
        Ok(())
    }
}

fn row_to_review(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        course_id: row.get(1)?,
        rating: row.get(2)?,
        comment: row.get(3)?,
    })
}
