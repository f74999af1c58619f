use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use yaml_rust::{ScanError, Yaml, YamlLoader};

use crate::data_structs::course::{Course, CourseNo, CourseNoParseError};
use crate::data_structs::enrollment::Enrollment;
use crate::database::default_courses;

pub const DEFAULT_JWT_SECRET: &str = "This is my special secret";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid YAML: {0}")]
    Yaml(#[from] ScanError),

    #[error("{key} must be {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("invalid course number in config: {0}")]
    InvalidCourseNo(#[from] CourseNoParseError),
}

#[derive(Debug, PartialEq, Eq)]
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub cors_allowed_origins: Vec<String>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
}

impl Default for AppConfig {
    fn default() -> Self {
        return AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            cors_allowed_origins: Vec::new(),
            courses: default_courses(),
            enrollments: Vec::new(),
        }
    }
}

impl AppConfig {

    /// Reads the YAML config at `path`. A missing file is not an error, the defaults are used.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(buf) => Self::from_yaml_str(&buf),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("No config file found at {}, using defaults", path.display());
                Ok(AppConfig::default())
            },
            Err(e) => Err(e.into())
        }
    }

    pub fn from_yaml_str(buf: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(buf)?;
        let mut config = AppConfig::default();
        let Some(doc) = docs.first() else {
            return Ok(config);
        };

        let server = &doc["server"];
        if let Some(host) = optional_str(&server["host"], "server.host")? {
            config.host = host.to_string();
        }
        if let Some(port) = optional_i64(&server["port"], "server.port")? {
            config.port = u16::try_from(port).map_err(|_| ConfigError::InvalidValue {
                key: "server.port".to_string(),
                expected: "a port number between 0 and 65535"
            })?;
        }
        if let Some(secret) = optional_str(&doc["jwt-secret"], "jwt-secret")? {
            config.jwt_secret = secret.to_string();
        }
        if let Some(origins) = optional_vec(&doc["cors-allowed-origins"], "cors-allowed-origins")? {
            config.cors_allowed_origins = origins.iter()
                .map(|origin| required_str(origin, "cors-allowed-origins[]").map(str::to_string))
                .collect::<Result<_, _>>()?;
        }
        if let Some(courses) = optional_vec(&doc["courses"], "courses")? {
            config.courses = courses.iter()
                .map(|course| -> Result<Course, ConfigError> {
                    Ok(Course {
                        course_no: parse_course_no(&course["courseNo"], "courses[].courseNo")?,
                        title: required_str(&course["title"], "courses[].title")?.to_string(),
                    })
                })
                .collect::<Result<_, ConfigError>>()?;
        }
        if let Some(enrollments) = optional_vec(&doc["enrollments"], "enrollments")? {
            config.enrollments = enrollments.iter()
                .map(|enrollment| -> Result<Enrollment, ConfigError> {
                    Ok(Enrollment {
                        student_id: required_str(&enrollment["studentId"], "enrollments[].studentId")?.to_string(),
                        course_no: parse_course_no(&enrollment["courseNo"], "enrollments[].courseNo")?,
                    })
                })
                .collect::<Result<_, ConfigError>>()?;
        }

        Ok(config)
    }

    /// A `JWT_SECRET` from the environment wins over the config file.
    pub fn with_jwt_secret_override(mut self, jwt_secret: Option<String>) -> Self {
        if let Some(secret) = jwt_secret.filter(|secret| !secret.is_empty()) {
            self.jwt_secret = secret;
        }
        self
    }
}

fn invalid(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_string(), expected }
}

fn optional_str<'a>(value: &'a Yaml, key: &str) -> Result<Option<&'a str>, ConfigError> {
    match value {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::String(s) => Ok(Some(s.as_str())),
        _ => Err(invalid(key, "a string"))
    }
}

fn required_str<'a>(value: &'a Yaml, key: &str) -> Result<&'a str, ConfigError> {
    value.as_str().ok_or_else(|| invalid(key, "a string"))
}

fn optional_i64(value: &Yaml, key: &str) -> Result<Option<i64>, ConfigError> {
    match value {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i)),
        _ => Err(invalid(key, "an integer"))
    }
}

fn optional_vec<'a>(value: &'a Yaml, key: &str) -> Result<Option<&'a Vec<Yaml>>, ConfigError> {
    match value {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Array(items) => Ok(Some(items)),
        _ => Err(invalid(key, "a list"))
    }
}

// unquoted numbers like 001101 would lose their leading zeros, so only strings are accepted
fn parse_course_no(value: &Yaml, key: &str) -> Result<CourseNo, ConfigError> {
    let raw = value.as_str().ok_or_else(|| invalid(key, "a quoted string"))?;
    Ok(raw.parse::<CourseNo>()?)
}
