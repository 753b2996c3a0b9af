use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVariable(&'static str),
    #[error("{0} must not be empty")]
    EmptyVariable(&'static str),
    #[error("Unknown schema mode: {0}")]
    InvalidSchemaMode(String),
    #[error("Invalid database URL")]
    InvalidUrl(#[source] sqlx::Error),
    #[error("Failed to load profile file {0}")]
    InvalidProfileFile(String, #[source] dotenvy::Error),
}

impl PartialEq for ConfigError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingVariable(a), Self::MissingVariable(b)) => a == b,
            (Self::EmptyVariable(a), Self::EmptyVariable(b)) => a == b,
            (Self::InvalidSchemaMode(a), Self::InvalidSchemaMode(b)) => a == b,
            (Self::InvalidUrl(_), Self::InvalidUrl(_)) => true,
            (
                Self::InvalidProfileFile(a, _),
                Self::InvalidProfileFile(b, _),
            ) => a == b,
            _ => false,
        }
    }
}
