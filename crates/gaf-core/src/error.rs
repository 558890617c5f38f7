use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Query error: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Invalid connection URL: {0}")]
    InvalidConnectionUrl(String),

    #[error("Invalid pool configuration: {0}")]
    InvalidPoolConfig(String),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),
}

impl Error {
    /// Stable machine-readable code, used by the HTTP layer
    pub fn code(&self) -> &'static str {
        match self {
            Error::Connection(_) => "CONNECTION_ERROR",
            Error::Query(_) => "QUERY_ERROR",
            Error::InvalidConnectionUrl(_) => "INVALID_CONNECTION_URL",
            Error::InvalidPoolConfig(_) => "INVALID_POOL_CONFIG",
            Error::ArtifactNotFound(_) => "ARTIFACT_NOT_FOUND",
        }
    }

    /// Returns true for failures raised by the storage driver
    pub fn is_database(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Query(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_errors_are_database_errors() {
        assert!(Error::Connection(sqlx::Error::PoolTimedOut).is_database());
        assert!(Error::Query(sqlx::Error::RowNotFound).is_database());
        assert!(!Error::ArtifactNotFound("BTC-USD".into()).is_database());
    }

    #[test]
    fn test_query_error_keeps_driver_message() {
        let err = Error::Query(sqlx::Error::Protocol("syntax error at or near \"SELEC\"".into()));
        assert_eq!(err.code(), "QUERY_ERROR");
        assert!(err.to_string().contains("syntax error at or near"));
    }
}
