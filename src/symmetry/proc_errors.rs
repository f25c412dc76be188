use crate::kernel;
use crate::tree;

/// Symmetry synthesis error type.
#[derive(Debug)]
pub enum SymmetryError {
    /// Tree access error (missing body, malformed zone).
    TreeError(tree::TreeError),
    /// Geometry kernel failure.
    KernelError(kernel::KernelError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for SymmetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymmetryError::TreeError(error) => write!(f, "- Tree Error:\n{}", error),
            SymmetryError::KernelError(error) => write!(f, "- Kernel Error:\n{}", error),
            SymmetryError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<tree::TreeError> for SymmetryError {
    fn from(error: tree::TreeError) -> Self {
        SymmetryError::TreeError(error)
    }
}
impl From<kernel::KernelError> for SymmetryError {
    fn from(error: kernel::KernelError) -> Self {
        SymmetryError::KernelError(error)
    }
}
impl From<String> for SymmetryError {
    fn from(error: String) -> Self {
        SymmetryError::StringOnly(error)
    }
}

/// Result type for the `symmetry` module.
pub type ProcResult<T> = std::result::Result<T, SymmetryError>;

/// Create a `SymmetryError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(SymmetryError::StringOnly(error_str.to_string()))
}
