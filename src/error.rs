//! Error types for catalog loading and round generation

/// Alias for `Result<T, QuizError>`.
pub type QuizResult<T> = Result<T, QuizError>;

/// Errors that can stop a round from being built.
///
/// Malformed persisted preferences are deliberately absent: those fall back
/// to their defaults inside [`crate::preferences`].
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// Not enough airlines left to fill the requested draw.
    #[error("catalog has {available} usable airlines, {required} required")]
    InsufficientCatalog {
        /// Airlines available after any exclusion.
        available: usize,
        /// Airlines the draw needed.
        required: usize,
    },

    /// Two catalog records share an id.
    #[error("duplicate airline id: \"{0}\"")]
    DuplicateAirline(String),

    /// An IATA code that is not 2-3 ASCII letters or digits.
    #[error("airline \"{id}\" has invalid IATA code \"{code}\"")]
    InvalidIataCode {
        /// Offending airline id.
        id: String,
        /// The rejected code.
        code: String,
    },

    /// Catalog JSON could not be parsed.
    #[error("malformed catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),
}
