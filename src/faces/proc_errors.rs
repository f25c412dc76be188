use crate::tree;

/// Face utility error type.
#[derive(Debug)]
pub enum FaceError {
    /// Tree access error.
    TreeError(tree::TreeError),
    /// Index past the end of a face or edge list.
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for FaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaceError::TreeError(error) => write!(f, "- Tree Error:\n{}", error),
            FaceError::OutOfRange{what, index, len} => write!(f, "- {} index {} out of range ({} available)", what, index, len),
            FaceError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<tree::TreeError> for FaceError {
    fn from(error: tree::TreeError) -> Self {
        FaceError::TreeError(error)
    }
}
impl From<String> for FaceError {
    fn from(error: String) -> Self {
        FaceError::StringOnly(error)
    }
}

/// Result type for the `faces` module.
pub type ProcResult<T> = std::result::Result<T, FaceError>;

/// Create a `FaceError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(FaceError::StringOnly(error_str.to_string()))
}
