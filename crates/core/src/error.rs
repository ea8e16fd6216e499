use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Invalid server URL `{}`: {}", .0, .1)]
    InvalidServerUrl(String, url::ParseError),

    #[error("Unsupported server URL scheme `{}`: expected `http` or `https`", .0)]
    UnsupportedScheme(String),

    #[error("Error requesting the command catalog: {}", .0)]
    CatalogRequest(#[from] reqwest::Error),

    #[error("Error parsing the command catalog: {}", .0)]
    CatalogParse(serde_json::Error),

    #[error("Error encoding the execution request: {}", .0)]
    Encode(serde_json::Error),

    #[error("Invalid name: command and argument names may not be empty")]
    EmptyName,

    #[error("Command not found: `{}`", .0)]
    CommandNotFound(String),

    #[error("Missing argument: {}", .0)]
    MissingArgument(String),

    #[error("Argument {} must be an integer, got `{}`", .name, .value)]
    NotAnInteger { name: String, value: String },

    #[error("Argument `{}` is not defined for this command", .0)]
    UnknownArgument(String),

    #[error("Parameter `{}` is not in the format key=value", .0)]
    ParameterFormat(String),

    #[error("Expected {} positional arguments but got {}", .0, .1)]
    ParameterCountMismatch(usize, usize),

    #[error("Named parameters (-p key=value) and positional arguments can not be mixed")]
    MixedParameterMode,

    #[error("Execution of `{}` failed: {}", .0, .1)]
    ExecutionFailed(String, String),

    #[error("Misc error: {}", .0)]
    Misc(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn not_an_integer(name: &str, value: &str) -> Self {
        Self::NotAnInteger {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
