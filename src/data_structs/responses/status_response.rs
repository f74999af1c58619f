use serde::{Deserialize, Serialize};

use crate::data_structs::course::Course;

/// The `{ ok, message }` body every enrollment route answers with.
#[derive(Debug, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self { ok: true, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { ok: false, message: message.into() }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
pub struct EnrolledCoursesResponse {
    pub ok: bool,
    pub courses: Vec<Course>,
}

impl EnrolledCoursesResponse {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { ok: true, courses }
    }
}
