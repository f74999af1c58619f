use serde::Serialize;
use serde_json::Value;

use crate::data_structs::course::CourseNo;

/// Body of `POST /enrollments` and `DELETE /enrollments`.
///
/// `courseNo` is kept as a raw JSON value so that a missing or non-string value is
/// reported the same way as a string of the wrong length.
#[derive(Debug, PartialEq)]
#[derive(Serialize)]
pub struct CourseSelection {
    #[serde(rename = "courseNo", default)]
    pub course_no: Value,
}

impl CourseSelection {
    /// Reads a request body. Only a JSON object carries a selection; arrays and scalars
    /// come back with no `courseNo` at all.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        let course_no = match serde_json::from_slice::<Value>(body)? {
            Value::Object(mut fields) => fields.remove("courseNo").unwrap_or_default(),
            _ => Value::Null
        };
        Ok(CourseSelection { course_no })
    }

    pub fn course_no(&self) -> Option<CourseNo> {
        self.course_no.as_str()?.parse().ok()
    }
}
