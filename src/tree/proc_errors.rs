/// Tree access error type.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// A required node is missing.
    NotFound {
        /// What was searched for (node name or kind).
        name: String,
        /// Name of the node the search started from.
        parent: String,
    },
    /// A node exists but its value does not have the expected shape.
    WrongValue {
        name: String,
        expected: String,
    },
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::NotFound{name, parent} => write!(f, "- Node \"{}\" not found under \"{}\"", name, parent),
            TreeError::WrongValue{name, expected} => write!(f, "- Node \"{}\" does not hold {}", name, expected),
            TreeError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<String> for TreeError {
    fn from(error: String) -> Self {
        TreeError::StringOnly(error)
    }
}

/// Result type for the `tree` module.
pub type ProcResult<T> = std::result::Result<T, TreeError>;

/// Create a `TreeError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(TreeError::StringOnly(error_str.to_string()))
}

/// Create a `TreeError::NotFound`.
pub fn not_found(name: &str, parent: &str) -> TreeError {
    TreeError::NotFound{name: name.to_string(), parent: parent.to_string()}
}
