use serde::{Deserialize, Serialize};

use crate::data_structs::course::CourseNo;

#[derive(Debug, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
#[derive(Clone)]
pub struct Enrollment {
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(rename = "courseNo")]
    pub course_no: CourseNo,
}

impl Enrollment {
    pub fn new(student_id: impl Into<String>, course_no: CourseNo) -> Self {
        Self { student_id: student_id.into(), course_no }
    }

    pub fn matches(&self, student_id: &str, course_no: &CourseNo) -> bool {
        self.student_id == student_id && &self.course_no == course_no
    }
}
