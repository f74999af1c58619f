use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::data_structs::course::{Course, CourseNo};
use crate::data_structs::enrollment::Enrollment;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("course {0} does not exist")]
    CourseNotFound(CourseNo),

    #[error("student {student_id} is already enrolled in {course_no}")]
    AlreadyEnrolled { student_id: String, course_no: CourseNo },

    #[error("student {student_id} is not enrolled in {course_no}")]
    NotEnrolled { student_id: String, course_no: CourseNo },

    #[error("course {0} is listed more than once")]
    DuplicateCourse(CourseNo),

    #[error("database lock was poisoned by a panicking request")]
    LockPoisoned,
}

#[derive(Debug, Default)]
struct Tables {
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
}

impl Tables {
    fn find_course(&self, course_no: &CourseNo) -> Option<&Course> {
        self.courses.iter().find(|course| &course.course_no == course_no)
    }

    fn find_enrollment(&self, student_id: &str, course_no: &CourseNo) -> Option<usize> {
        self.enrollments.iter().position(|enrollment| enrollment.matches(student_id, course_no))
    }
}

/// In-memory mock database shared by every worker.
///
/// Cloning is cheap and clones share the same tables.
#[derive(Debug)]
#[derive(Clone)]
pub struct Database {
    tables: Arc<RwLock<Tables>>,
}

impl Database {

    /// Builds the database from seed data. Seed enrollments go through the same
    /// checks as a live enroll, so they must reference a seeded course and be unique.
    pub fn new(courses: Vec<Course>, enrollments: Vec<Enrollment>) -> Result<Self, DatabaseError> {
        let mut tables = Tables::default();
        for course in courses {
            if tables.find_course(&course.course_no).is_some() {
                return Err(DatabaseError::DuplicateCourse(course.course_no));
            }
            tables.courses.push(course);
        }

        let database = Database { tables: Arc::new(RwLock::new(tables)) };
        for enrollment in enrollments {
            database.enroll(&enrollment.student_id, &enrollment.course_no)?;
        }
        Ok(database)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DatabaseError> {
        self.tables.read().map_err(|_| DatabaseError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DatabaseError> {
        self.tables.write().map_err(|_| DatabaseError::LockPoisoned)
    }

    pub fn is_enrolled(&self, student_id: &str, course_no: &CourseNo) -> Result<bool, DatabaseError> {
        Ok(self.read()?.find_enrollment(student_id, course_no).is_some())
    }

    /// Adds an enrollment. The course lookup, duplicate check and insert happen under
    /// one write lock.
    pub fn enroll(&self, student_id: &str, course_no: &CourseNo) -> Result<(), DatabaseError> {
        let mut tables = self.write()?;

        if tables.find_course(course_no).is_none() {
            return Err(DatabaseError::CourseNotFound(course_no.clone()));
        }

        if tables.find_enrollment(student_id, course_no).is_some() {
            return Err(DatabaseError::AlreadyEnrolled {
                student_id: student_id.to_owned(),
                course_no: course_no.clone()
            });
        }

        tables.enrollments.push(Enrollment::new(student_id, course_no.clone()));
        Ok(())
    }

    /// Removes an enrollment and returns it.
    pub fn drop_enrollment(&self, student_id: &str, course_no: &CourseNo) -> Result<Enrollment, DatabaseError> {
        let mut tables = self.write()?;
        match tables.find_enrollment(student_id, course_no) {
            Some(index) => Ok(tables.enrollments.remove(index)),
            None => Err(DatabaseError::NotEnrolled {
                student_id: student_id.to_owned(),
                course_no: course_no.clone()
            })
        }
    }

    /// Courses the student is enrolled in, in the order they enrolled.
    pub fn enrolled_courses(&self, student_id: &str) -> Result<Vec<Course>, DatabaseError> {
        let tables = self.read()?;
        let courses = tables.enrollments.iter()
            .filter(|enrollment| enrollment.student_id == student_id)
            .filter_map(|enrollment| tables.find_course(&enrollment.course_no).cloned())
            .collect();
        Ok(courses)
    }

    pub fn enrollments(&self) -> Result<Vec<Enrollment>, DatabaseError> {
        Ok(self.read()?.enrollments.clone())
    }
}

/// Course catalog used when the configuration does not list any courses.
pub fn default_courses() -> Vec<Course> {
    [
        ("001101", "Fundamental English 1"),
        ("001102", "Fundamental English 2"),
        ("201111", "The World of Science"),
        ("206113", "Calculus for Software Engineering"),
        ("261207", "Basic Computer Engineering Lab"),
        ("261497", "Full Stack Development"),
    ]
        .into_iter()
        .map(|(course_no, title)| Course {
            course_no: CourseNo::try_from(course_no.to_string())
                .expect("built-in course numbers are six characters"),
            title: title.to_string()
        })
        .collect()
}
