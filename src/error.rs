/// Error types for sqlx-named-query
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error during SQL template parsing
    #[error("Failed to parse SQL template: {0}")]
    Parse(#[from] regex::Error),

    /// A bind call referenced a name that does not appear in the statement
    #[error("No parameter named ':{0}' in the statement")]
    ParameterNotFound(String),

    /// The statement was executed while a placeholder still had no value
    #[error("Parameter ':{name}' (placeholder {position}) was never bound")]
    Unbound { name: String, position: usize },

    /// A result column has no matching field on the target row shape
    #[error("Result column '{0}' has no matching field on the target type")]
    UnmappedColumn(String),

    /// A column value could not be assigned to its same-named field
    #[error("Result column '{column}' could not be assigned: {source}")]
    ColumnDecode { column: String, source: sqlx::Error },

    /// Error from SQLx database operations
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An operation was attempted out of lifecycle order
    #[error("Cannot {operation} a statement that is already {state}")]
    IllegalState {
        operation: &'static str,
        state: &'static str,
    },
}

/// Result type alias for sqlx-named-query operations
pub type Result<T> = std::result::Result<T, Error>;
