use crate::sampler;
use crate::tree;

/// IBC record error type.
#[derive(Debug)]
pub enum IbcError {
    /// Tree access error (missing node, wrong value type).
    TreeError(tree::TreeError),
    /// Field sampler failure.
    SamplerError(sampler::SamplerError),
    /// A record field does not hold `nIBC` values.
    LengthMismatch {
        record: String,
        field: String,
        expected: usize,
        found: usize,
    },
    /// The sampler returned the wrong number of tuples.
    SampleCount {
        record: String,
        expected: usize,
        found: usize,
    },
    /// A sampled tuple is too short for the requested column.
    MissingColumn {
        record: String,
        column: usize,
        width: usize,
    },
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for IbcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IbcError::TreeError(error) => write!(f, "- Tree Error:\n{}", error),
            IbcError::SamplerError(error) => write!(f, "- Sampler Error:\n{}", error),
            IbcError::LengthMismatch{record, field, expected, found} => write!(f,
                "- Field {} of record {} has {} values, expected {} (nIBC)",
                field, record, found, expected,
            ),
            IbcError::SampleCount{record, expected, found} => write!(f,
                "- Sampler returned {} tuples for the {} wall points of record {}",
                found, expected, record,
            ),
            IbcError::MissingColumn{record, column, width} => write!(f,
                "- Sampled column {} requested for record {}, but tuples only have {} values",
                column, record, width,
            ),
            IbcError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<tree::TreeError> for IbcError {
    fn from(error: tree::TreeError) -> Self {
        IbcError::TreeError(error)
    }
}
impl From<sampler::SamplerError> for IbcError {
    fn from(error: sampler::SamplerError) -> Self {
        IbcError::SamplerError(error)
    }
}
impl From<String> for IbcError {
    fn from(error: String) -> Self {
        IbcError::StringOnly(error)
    }
}

/// Result type for the `ibc` module.
pub type ProcResult<T> = std::result::Result<T, IbcError>;

/// Create an `IbcError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(IbcError::StringOnly(error_str.to_string()))
}
