use crate::{
    ibc,
    io,
    kernel,
    sampler,
    sizing,
    symmetry,
    tree,
};

/// Case run error type.
/// Wraps the error of the step that failed.
#[derive(Debug)]
pub enum CaseError {
    IoError(io::IoError),
    TreeError(tree::TreeError),
    KernelError(kernel::KernelError),
    SamplerError(sampler::SamplerError),
    SizingError(sizing::SizingError),
    SymmetryError(symmetry::SymmetryError),
    IbcError(ibc::IbcError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for CaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseError::IoError(error) => write!(f, "- IO Error:\n{}", error),
            CaseError::TreeError(error) => write!(f, "- Tree Error:\n{}", error),
            CaseError::KernelError(error) => write!(f, "- Kernel Error:\n{}", error),
            CaseError::SamplerError(error) => write!(f, "- Sampler Error:\n{}", error),
            CaseError::SizingError(error) => write!(f, "- Sizing Error:\n{}", error),
            CaseError::SymmetryError(error) => write!(f, "- Symmetry Error:\n{}", error),
            CaseError::IbcError(error) => write!(f, "- IBC Error:\n{}", error),
            CaseError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<io::IoError> for CaseError {
    fn from(error: io::IoError) -> Self {
        CaseError::IoError(error)
    }
}
impl From<tree::TreeError> for CaseError {
    fn from(error: tree::TreeError) -> Self {
        CaseError::TreeError(error)
    }
}
impl From<kernel::KernelError> for CaseError {
    fn from(error: kernel::KernelError) -> Self {
        CaseError::KernelError(error)
    }
}
impl From<sampler::SamplerError> for CaseError {
    fn from(error: sampler::SamplerError) -> Self {
        CaseError::SamplerError(error)
    }
}
impl From<sizing::SizingError> for CaseError {
    fn from(error: sizing::SizingError) -> Self {
        CaseError::SizingError(error)
    }
}
impl From<symmetry::SymmetryError> for CaseError {
    fn from(error: symmetry::SymmetryError) -> Self {
        CaseError::SymmetryError(error)
    }
}
impl From<ibc::IbcError> for CaseError {
    fn from(error: ibc::IbcError) -> Self {
        CaseError::IbcError(error)
    }
}
impl From<String> for CaseError {
    fn from(error: String) -> Self {
        CaseError::StringOnly(error)
    }
}

/// Result type for the `case` module.
pub type ProcResult<T> = std::result::Result<T, CaseError>;

/// Create a `CaseError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(CaseError::StringOnly(error_str.to_string()))
}
