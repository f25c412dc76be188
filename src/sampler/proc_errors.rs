use crate::tree;

/// Field sampler error type.
#[derive(Debug)]
pub enum SamplerError {
    /// Tree access error on the source zone.
    TreeError(tree::TreeError),
    /// The source zone cannot be sampled.
    EmptySource(String),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for SamplerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplerError::TreeError(error) => write!(f, "- Tree Error:\n{}", error),
            SamplerError::EmptySource(name) => write!(f, "- Source zone \"{}\" has no vertices to sample", name),
            SamplerError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<tree::TreeError> for SamplerError {
    fn from(error: tree::TreeError) -> Self {
        SamplerError::TreeError(error)
    }
}
impl From<String> for SamplerError {
    fn from(error: String) -> Self {
        SamplerError::StringOnly(error)
    }
}

/// Result type for the `sampler` module.
pub type ProcResult<T> = std::result::Result<T, SamplerError>;

/// Create a `SamplerError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(SamplerError::StringOnly(error_str.to_string()))
}
