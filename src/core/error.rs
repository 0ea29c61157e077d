use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidToml,
    ConfigNotFound,

    ValidationMissingArgument,
    ValidationInvalidPattern,

    RenameInvalidInput,
    RenameCollision,
    RenameDestinationExists,
    RenameFailed,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidToml => "config.invalid_toml",
            ErrorCode::ConfigNotFound => "config.not_found",

            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidPattern => "validation.invalid_pattern",

            ErrorCode::RenameInvalidInput => "rename.invalid_input",
            ErrorCode::RenameCollision => "rename.collision",
            ErrorCode::RenameDestinationExists => "rename.destination_exists",
            ErrorCode::RenameFailed => "rename.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }

    /// Whether an error with this code stops the run before any file is touched.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ErrorCode::RenameDestinationExists | ErrorCode::RenameFailed
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPatternDetails {
    pub pattern: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDetails {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionDetails {
    pub sources: Vec<String>,
    pub destination: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePairDetails {
    pub source: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            to_details(MissingArgumentDetails { args }),
        )
    }

    pub fn validation_invalid_pattern(pattern: impl Into<String>, error: impl Into<String>) -> Self {
        let pattern = pattern.into();
        Self::new(
            ErrorCode::ValidationInvalidPattern,
            format!("Invalid pattern \"{}\"", pattern),
            to_details(InvalidPatternDetails {
                pattern,
                error: error.into(),
            }),
        )
    }

    pub fn config_not_found(path: &Path) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Config file \"{}\" not found", path.display()),
            to_details(ConfigDetails {
                path: display(path),
                error: None,
            }),
        )
    }

    pub fn config_invalid_toml(path: &Path, err: toml::de::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidToml,
            format!("Invalid TOML in \"{}\"", path.display()),
            to_details(ConfigDetails {
                path: display(path),
                error: Some(err.to_string()),
            }),
        )
    }

    pub fn rename_invalid_input(path: &Path) -> Self {
        Self::new(
            ErrorCode::RenameInvalidInput,
            format!("INVALID FILE \"{}\".", path.display()),
            to_details(PathDetails {
                path: display(path),
            }),
        )
    }

    pub fn rename_collision(sources: &[std::path::PathBuf], destination: &Path) -> Self {
        let sources: Vec<String> = sources.iter().map(|s| display(s)).collect();
        let listed = sources
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            ErrorCode::RenameCollision,
            format!("Colliding files: {} => \"{}\"", listed, destination.display()),
            to_details(CollisionDetails {
                sources,
                destination: display(destination),
            }),
        )
        .with_hint("Use --skip-problematic to rename the other files anyway")
    }

    pub fn rename_destination_exists(source: &Path, destination: &Path) -> Self {
        Self::new(
            ErrorCode::RenameDestinationExists,
            format!(
                "\"{}\" would be renamed as \"{}\" which already exists.",
                source.display(),
                destination.display()
            ),
            to_details(RenamePairDetails {
                source: display(source),
                destination: display(destination),
                error: None,
            }),
        )
    }

    pub fn rename_failed(source: &Path, destination: &Path, err: &std::io::Error) -> Self {
        Self::new(
            ErrorCode::RenameFailed,
            format!(
                "FAILED \"{}\" => \"{}\": {}",
                source.display(),
                destination.display(),
                err
            ),
            to_details(RenamePairDetails {
                source: display(source),
                destination: display(destination),
                error: Some(err.to_string()),
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            serde_json::json!({ "error": error.into(), "context": context }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
