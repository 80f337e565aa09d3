use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ServiceError {
    pub fn invalid(msg: &str) -> Self { Self::InvalidInput(msg.to_string()) }

    pub fn student_not_found(student_id: &str) -> Self {
        Self::NotFound(format!("Student with ID '{}' not found.", student_id))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidInput(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Persistence(_) => 1200,
        }
    }

    /// Detail without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            ServiceError::InvalidInput(m) | ServiceError::NotFound(m) | ServiceError::Persistence(m) => m,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Validation(m) => Self::InvalidInput(m),
            ModelError::NotFound => Self::NotFound("record not found".into()),
            ModelError::Db(m) => Self::Persistence(m),
        }
    }
}
