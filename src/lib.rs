pub mod api;
pub mod database;
pub mod error;
pub mod jwt_auth;

pub mod data_structs {
    pub mod app_config;
    pub mod course;
    pub mod enrollment;
    pub mod role;
    pub mod token_payload;

    pub mod requests {
        pub mod course_selection;
    }

    pub mod responses {
        pub mod status_response;
    }
}

use crate::data_structs::app_config::AppConfig;
use crate::database::{Database, DatabaseError};
use crate::jwt_auth::JwtSecretKey;

/// State handed to every actix worker. Clones share the same database.
#[derive(Debug)]
#[derive(Clone)]
pub struct SharedResources {
    pub jwt_secret: JwtSecretKey,
    pub database: Database,
}

impl SharedResources {
    pub fn new(jwt_secret: JwtSecretKey, database: Database) -> Self {
        SharedResources { jwt_secret, database }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        let database = Database::new(config.courses.clone(), config.enrollments.clone())?;
        Ok(SharedResources::new(JwtSecretKey::new(config.jwt_secret.clone()), database))
    }
}
