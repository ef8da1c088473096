mod common;

use anyhow::Result;
use course_reviews::{
    Course, CourseCrudPersister, CrudPersister, PersistenceErrorKind, Review, ReviewCrudPersister,
};
use rusqlite::Connection;
use std::error::Error as _;

use common::{count_rows, create_test_db};

fn create_course(conn: &Connection, name: &str) -> Course {
    CourseCrudPersister::new(conn)
        .unwrap()
        .create(&Course::new(name, Some("jhu-oose.com".to_string())))
        .unwrap()
}

#[test]
fn create_review_assigns_id() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let review = Review::new(course.id, 5, "fun");
    assert_eq!(review.id, 0);
    let created = reviews.create(&review)?;

    assert_ne!(created.id, 0);
    assert_eq!(review.id, 0);
    Ok(())
}

#[test]
fn read_review_returns_created_record() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let created = reviews.create(&Review::new(course.id, 5, "fun"))?;
    assert_eq!(reviews.read(created.id)?, Some(created.clone()));
    assert_eq!(reviews.read(created.id + 1)?, None);
    Ok(())
}

#[test]
fn update_review_overwrites_fields() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let mut review = reviews.create(&Review::new(course.id, 5, "fun"))?;
    review.comment = "super fun".to_string();
    review.rating = 4;
    reviews.update(&review)?;

    assert_eq!(reviews.read(review.id)?, Some(review));
    Ok(())
}

#[test]
fn update_review_can_move_between_courses() -> Result<()> {
    let conn = create_test_db();
    let oose = create_course(&conn, "oose");
    let os = create_course(&conn, "Intro os");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let mut review = reviews.create(&Review::new(oose.id, 5, "fun"))?;
    review.course_id = os.id;
    reviews.update(&review)?;

    assert!(reviews.list_by_course_id(oose.id)?.is_empty());
    assert_eq!(reviews.list_by_course_id(os.id)?, vec![review]);
    Ok(())
}

#[test]
fn update_review_to_missing_course_fails() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let created = reviews.create(&Review::new(course.id, 5, "fun"))?;
    let mut orphan = created.clone();
    orphan.course_id = 99999;

    let err = reviews.update(&orphan).unwrap_err();
    assert_eq!(err.kind(), PersistenceErrorKind::ConstraintViolation);
    assert_eq!(reviews.read(created.id)?, Some(created));
    Ok(())
}

#[test]
fn update_missing_review_reports_not_found() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let err = reviews
        .update(&Review::new(course.id, 5, "fun").with_id(12))
        .unwrap_err();
    assert_eq!(err.kind(), PersistenceErrorKind::NotFound);
    Ok(())
}

#[test]
fn delete_review_removes_row() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let created = reviews.create(&Review::new(course.id, 5, "fun"))?;
    reviews.delete(created.id)?;
    assert_eq!(reviews.read(created.id)?, None);

    // Deleting again is a no-op
    reviews.delete(created.id)?;
    Ok(())
}

#[test]
fn list_by_course_id_returns_only_that_course() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let other = create_course(&conn, "Data Structures");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let r1 = reviews.create(&Review::new(course.id, 5, "fun"))?;
    let r2 = reviews.create(&Review::new(course.id, 5, "cool"))?;
    let r3 = reviews.create(&Review::new(other.id, 5, "nicefun"))?;

    let results = reviews.list_by_course_id(course.id)?;
    assert!(results.contains(&r1));
    assert!(results.contains(&r2));
    assert!(!results.contains(&r3));
    assert_eq!(results.len(), 2);
    Ok(())
}

#[test]
fn list_for_course_without_reviews_is_empty() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    assert!(reviews.list_by_course_id(course.id)?.is_empty());
    Ok(())
}

#[test]
fn oose_scenario() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;

    assert_eq!(course.id, 1);
    let review = reviews.create(&Review::new(course.id, 5, "fun"))?;
    assert_eq!(review.id, 1);

    assert_eq!(
        reviews.list_by_course_id(1)?,
        vec![Review {
            id: 1,
            course_id: 1,
            rating: 5,
            comment: "fun".to_string(),
        }]
    );
    Ok(())
}

#[test]
fn adding_review_to_non_existing_course_fails() {
    let conn = create_test_db();
    let reviews = ReviewCrudPersister::new(&conn).unwrap();

    let err = reviews.create(&Review::new(99999, 5, "fun")).unwrap_err();
    assert_eq!(err.kind(), PersistenceErrorKind::ConstraintViolation);
    assert!(err.source().is_some());
    assert_eq!(count_rows(&conn, "Reviews"), 0);
}

#[test]
fn persister_enables_foreign_keys_on_a_bare_connection() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    course_reviews::sqlite::initialize_schema(&conn, &course_reviews::course_review_schema())?;
    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;

    let reviews = ReviewCrudPersister::new(&conn)?;
    let err = reviews.create(&Review::new(6521, 5, "fun")).unwrap_err();
    assert_eq!(err.kind(), PersistenceErrorKind::ConstraintViolation);
    assert_eq!(count_rows(&conn, "Reviews"), 0);
    Ok(())
}

#[test]
fn deleting_a_course_removes_its_reviews() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let other = create_course(&conn, "Data Structures");
    let reviews = ReviewCrudPersister::new(&conn)?;

    let gone = reviews.create(&Review::new(course.id, 5, "fun"))?;
    let kept = reviews.create(&Review::new(other.id, 3, "dry"))?;
    CourseCrudPersister::new(&conn)?.delete(course.id)?;

    assert_eq!(reviews.read(gone.id)?, None);
    assert_eq!(reviews.read(kept.id)?, Some(kept));
    Ok(())
}

#[test]
fn list_by_course_id_propagates_storage_failures() -> Result<()> {
    let conn = create_test_db();
    let course = create_course(&conn, "oose");
    let reviews = ReviewCrudPersister::new(&conn)?;
    conn.execute_batch("DROP TABLE Reviews;")?;

    let err = reviews.list_by_course_id(course.id).unwrap_err();
    assert_eq!(err.kind(), PersistenceErrorKind::Storage);
    Ok(())
}
