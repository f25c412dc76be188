use crate::tree;

/// Geometry kernel error type.
#[derive(Debug)]
pub enum KernelError {
    /// Tree access error.
    TreeError(tree::TreeError),
    /// The inputs cannot produce a result.
    InvalidInput(String),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::TreeError(error) => write!(f, "- Tree Error:\n{}", error),
            KernelError::InvalidInput(error) => write!(f, "- Invalid kernel input: {}", error),
            KernelError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<tree::TreeError> for KernelError {
    fn from(error: tree::TreeError) -> Self {
        KernelError::TreeError(error)
    }
}
impl From<String> for KernelError {
    fn from(error: String) -> Self {
        KernelError::StringOnly(error)
    }
}

/// Result type for the `kernel` module.
pub type ProcResult<T> = std::result::Result<T, KernelError>;

/// Create a `KernelError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(KernelError::StringOnly(error_str.to_string()))
}
