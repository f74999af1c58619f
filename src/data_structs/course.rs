use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const COURSE_NO_LENGTH: usize = 6;

/// A course identifier, always exactly six characters long.
#[derive(Debug, PartialEq, Eq, Hash)]
#[derive(Deserialize, Serialize)]
#[derive(Clone)]
#[serde(try_from = "String", into = "String")]
pub struct CourseNo(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{value:?} is not a 6 character course number")]
pub struct CourseNoParseError {
    pub value: String,
}

impl CourseNo {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CourseNo {
    type Err = CourseNoParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != COURSE_NO_LENGTH {
            return Err(CourseNoParseError { value: s.to_owned() });
        }
        Ok(CourseNo(s.to_owned()))
    }
}

impl TryFrom<String> for CourseNo {
    type Error = CourseNoParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CourseNo::from_str(&value)
    }
}

impl From<CourseNo> for String {
    fn from(course_no: CourseNo) -> Self {
        course_no.0
    }
}

impl Display for CourseNo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
#[derive(Clone)]
pub struct Course {
    #[serde(rename = "courseNo")]
    pub course_no: CourseNo,
    pub title: String,
}
