#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
