use serde::{Deserialize, Serialize};

use crate::data_structs::role::Role;

/// Claims carried by a bearer token.
///
/// `exp` and `nbf` are the registered JWT claims (seconds since the epoch). They are
/// optional, and only checked when the issuer set them.
#[derive(Debug, PartialEq, Eq)]
#[derive(Deserialize, Serialize)]
#[derive(Clone)]
pub struct TokenPayload {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

impl TokenPayload {
    pub fn new(student_id: impl Into<String>, role: Role) -> Self {
        Self { student_id: student_id.into(), role, exp: None, nbf: None }
    }

    pub fn expiring_at(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Whether `now` falls inside the token's validity window.
    pub fn is_valid_at(&self, now: i64) -> bool {
        if let Some(exp) = self.exp {
            if now >= exp {
                return false;
            }
        }
        if let Some(nbf) = self.nbf {
            if now < nbf {
                return false;
            }
        }
        true
    }
}
