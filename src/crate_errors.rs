use crate::{
    args,
    case,
    faces,
    ibc,
    io,
    kernel,
    sampler,
    sizing,
    symmetry,
    tree,
};

/// Error-type enum for the `ibmprep` crate.
/// Wraps the error of each module, printed under the name of the stage that raised it.
#[derive(Debug)]
pub enum IbmError {
    ArgError(args::ArgError),
    IoError(io::IoError),
    TreeError(tree::TreeError),
    KernelError(kernel::KernelError),
    SamplerError(sampler::SamplerError),
    SizingError(sizing::SizingError),
    SymmetryError(symmetry::SymmetryError),
    IbcError(ibc::IbcError),
    FaceError(faces::FaceError),
    CaseError(case::CaseError),
    StringOnly(String),
}
impl std::fmt::Display for IbmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IbmError::ArgError(error) => write!(f, "! ARGUMENT ERROR:\n{}", error),
            IbmError::IoError(error) => write!(f, "! IO ERROR:\n{}", error),
            IbmError::TreeError(error) => write!(f, "! TREE ERROR:\n{}", error),
            IbmError::KernelError(error) => write!(f, "! KERNEL ERROR:\n{}", error),
            IbmError::SamplerError(error) => write!(f, "! SAMPLER ERROR:\n{}", error),
            IbmError::SizingError(error) => write!(f, "! SIZING ERROR:\n{}", error),
            IbmError::SymmetryError(error) => write!(f, "! SYMMETRY ERROR:\n{}", error),
            IbmError::IbcError(error) => write!(f, "! IBC ERROR:\n{}", error),
            IbmError::FaceError(error) => write!(f, "! FACE ERROR:\n{}", error),
            IbmError::CaseError(error) => write!(f, "! CASE ERROR:\n{}", error),
            IbmError::StringOnly(error) => write!(f, "! IBMPREP ERROR:\n- {}", error),
        }
    }
}
impl From<String> for IbmError {
    fn from(error: String) -> Self {
        IbmError::StringOnly(error)
    }
}
impl From<args::ArgError> for IbmError {
    fn from(error: args::ArgError) -> Self {
        IbmError::ArgError(error)
    }
}
impl From<io::IoError> for IbmError {
    fn from(error: io::IoError) -> Self {
        IbmError::IoError(error)
    }
}
impl From<tree::TreeError> for IbmError {
    fn from(error: tree::TreeError) -> Self {
        IbmError::TreeError(error)
    }
}
impl From<kernel::KernelError> for IbmError {
    fn from(error: kernel::KernelError) -> Self {
        IbmError::KernelError(error)
    }
}
impl From<sampler::SamplerError> for IbmError {
    fn from(error: sampler::SamplerError) -> Self {
        IbmError::SamplerError(error)
    }
}
impl From<sizing::SizingError> for IbmError {
    fn from(error: sizing::SizingError) -> Self {
        IbmError::SizingError(error)
    }
}
impl From<symmetry::SymmetryError> for IbmError {
    fn from(error: symmetry::SymmetryError) -> Self {
        IbmError::SymmetryError(error)
    }
}
impl From<ibc::IbcError> for IbmError {
    fn from(error: ibc::IbcError) -> Self {
        IbmError::IbcError(error)
    }
}
impl From<faces::FaceError> for IbmError {
    fn from(error: faces::FaceError) -> Self {
        IbmError::FaceError(error)
    }
}
impl From<case::CaseError> for IbmError {
    fn from(error: case::CaseError) -> Self {
        IbmError::CaseError(error)
    }
}

/// Result type for the `ibmprep` crate.
pub type IbmResult<T> = std::result::Result<T, IbmError>;

/// Create an `IbmResult` with an `Err` from a string.
/// Shorthand to avoid writing `Err(crate::IbmError::StringOnly(error_str))`.
pub fn err_str<T>(error_str: &str) -> IbmResult<T> {
    Err(IbmError::StringOnly(error_str.to_string()))
}
