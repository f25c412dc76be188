use crate::kernel;
use crate::tree;

/// Sizing error type.
#[derive(Debug)]
pub enum SizingError {
    /// Tree access error.
    TreeError(tree::TreeError),
    /// Geometry kernel failure.
    KernelError(kernel::KernelError),
    /// Far-field parameters out of range.
    InvalidParameter(String),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for SizingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizingError::TreeError(error) => write!(f, "- Tree Error:\n{}", error),
            SizingError::KernelError(error) => write!(f, "- Kernel Error:\n{}", error),
            SizingError::InvalidParameter(error) => write!(f, "- Invalid far-field parameter: {}", error),
            SizingError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<tree::TreeError> for SizingError {
    fn from(error: tree::TreeError) -> Self {
        SizingError::TreeError(error)
    }
}
impl From<kernel::KernelError> for SizingError {
    fn from(error: kernel::KernelError) -> Self {
        SizingError::KernelError(error)
    }
}
impl From<String> for SizingError {
    fn from(error: String) -> Self {
        SizingError::StringOnly(error)
    }
}

/// Result type for the `sizing` module.
pub type ProcResult<T> = std::result::Result<T, SizingError>;

/// Create a `SizingError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(SizingError::StringOnly(error_str.to_string()))
}
