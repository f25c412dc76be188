use std::io::Write;
pub mod stl;

use crate::tree::Node;

#[derive(Debug)]
pub enum IoErrorType {
    File(std::io::Error),
    SerdeJson(serde_json::Error),
    SerdeYaml(serde_yaml::Error),
    TomlDe(toml::de::Error),
    StringOnly(String),
}
impl std::fmt::Display for IoErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoErrorType::File(error) => write!(f, "- File IO Error:\n{}", error),
            IoErrorType::SerdeJson(error) => write!(f, "- JSON Serialization/Deserialization Error:\n{}", error),
            IoErrorType::SerdeYaml(error) => write!(f, "- YAML Serialization/Deserialization Error:\n{}", error),
            IoErrorType::TomlDe(error) => write!(f, "- TOML Deserialization Error:\n{}", error),
            IoErrorType::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}

/// Verbose IO error: the file involved, if any, and the cause.
#[derive(Debug)]
pub struct IoError {
    /// Filepath facing an error.
    pub file: Option<String>,
    /// Error cause.
    pub cause: IoErrorType,
}
impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "- Error with file: {}\n{}", file, self.cause),
            None => write!(f, "{}", self.cause),
        }
    }
}

pub type IoResult<T> = std::result::Result<T, IoError>;

fn file_error(path: &str, cause: IoErrorType) -> IoError {
    IoError{file: Some(path.to_string()), cause}
}

/// Open a file with verbose errors.
pub fn open(path: &str) -> IoResult<std::fs::File> {
    std::fs::File::open(path).map_err(|error| file_error(path, IoErrorType::File(error)))
}

/// Create a file with verbose errors.
pub fn create(path: &str) -> IoResult<std::fs::File> {
    std::fs::File::create(path).map_err(|error| file_error(path, IoErrorType::File(error)))
}

/// Read a whole file with verbose errors.
pub fn read_to_string(path: &str) -> IoResult<String> {
    std::fs::read_to_string(path).map_err(|error| file_error(path, IoErrorType::File(error)))
}

/// Write string to file with verbose errors.
pub fn write_to_file(path: &str, buffer: &str) -> IoResult<()> {
    let mut f = create(path)?;
    f.write_all(buffer.as_bytes()).map_err(|error| file_error(path, IoErrorType::File(error)))
}

/// Read in cfg files from the supported filetypes.
pub fn read_cfg_file<T>(path: &str) -> IoResult<T>
where T: serde::de::DeserializeOwned
{
    match path.split('.').last() {
        Some("json") => serde_json::from_reader(open(path)?)
            .map_err(|error| file_error(path, IoErrorType::SerdeJson(error))),
        Some("toml") => toml::from_str(&read_to_string(path)?)
            .map_err(|error| file_error(path, IoErrorType::TomlDe(error))),
        Some("yaml") | Some("yml") => serde_yaml::from_reader(open(path)?)
            .map_err(|error| file_error(path, IoErrorType::SerdeYaml(error))),
        _ => {
            let supported_filetypes = vec!["json", "toml", "yaml", "yml"];
            let error_string = format!("Unsupported filetype for config file: {}\nSupported filetypes: {:?}", path, supported_filetypes);
            Err(file_error(path, IoErrorType::StringOnly(error_string)))
        },
    }
}

/// Load a tree saved as JSON or YAML.
pub fn load_tree(path: &str) -> IoResult<Node> {
    match path.split('.').last() {
        Some("json") | Some("yaml") | Some("yml") => read_cfg_file(path),
        _ => Err(file_error(path, IoErrorType::StringOnly(
            format!("Unsupported filetype for tree file: {}\nSupported filetypes: [\"json\", \"yaml\", \"yml\"]", path)
        ))),
    }
}

/// Save a tree as JSON or YAML, chosen by extension.
pub fn save_tree(tree: &Node, path: &str) -> IoResult<()> {
    let buffer = match path.split('.').last() {
        Some("json") => serde_json::to_string_pretty(tree)
            .map_err(|error| file_error(path, IoErrorType::SerdeJson(error)))?,
        Some("yaml") | Some("yml") => serde_yaml::to_string(tree)
            .map_err(|error| file_error(path, IoErrorType::SerdeYaml(error)))?,
        _ => {
            return Err(file_error(path, IoErrorType::StringOnly(
                format!("Unsupported filetype for tree file: {}\nSupported filetypes: [\"json\", \"yaml\", \"yml\"]", path)
            )));
        },
    };
    write_to_file(path, &buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_3d::Point;
    use crate::tree::{ElementBlock, NodeKind};

    fn temp_path(name: &str) -> String {
        std::env::temp_dir().join(name).to_string_lossy().to_string()
    }

    fn sample_tree() -> Node {
        let points = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.5)];
        let base = Node::new_base("Base")
            .with_child(Node::new_zone("tri", &points, &ElementBlock::triangles(&[[0, 1, 2]])));
        Node::new_tree().with_child(base)
    }

    #[test]
    fn trees_round_trip_through_json_and_yaml() {
        let tree = sample_tree();
        for ext in ["json", "yaml"] {
            let path = temp_path(&format!("ibmprep_io_tree.{}", ext));
            save_tree(&tree, &path).unwrap();
            let loaded = load_tree(&path).unwrap();
            assert_eq!(loaded, tree);
            assert_eq!(loaded.require_zone("tri").unwrap().kind, NodeKind::Zone);
        }
    }

    #[test]
    fn unsupported_tree_format() {
        let error = save_tree(&sample_tree(), &temp_path("ibmprep_io_tree.toml")).unwrap_err();
        assert!(matches!(error.cause, IoErrorType::StringOnly(_)));
        assert!(load_tree("missing.cgns").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = read_cfg_file::<Node>("does/not/exist.yaml").unwrap_err();
        assert_eq!(error.file.as_deref(), Some("does/not/exist.yaml"));
        assert!(matches!(error.cause, IoErrorType::File(_)));
    }
}
