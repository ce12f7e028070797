//! Error types for langstrip-remux.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while filtering a directory of containers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remuxing tool is not available at the configured location.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The remuxing tool exited non-zero, wrote to stderr, or could not be run.
    #[error("tool execution failed: {tool}{}: {message}", fmt_code(.code))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        message: String,
    },

    /// No directory was supplied.
    #[error("no directory given; please provide a directory to process")]
    MissingDirectory,

    /// Listing the directory or replacing a file failed.
    #[error("file system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings cannot produce a valid job.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Processing a single file failed.
    #[error("failed to process {}: {source}", path.display())]
    Job {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

fn fmt_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => String::new(),
    }
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool failure without an exit code (spawn errors, stderr output).
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            code: None,
            message: message.into(),
        }
    }

    /// Create a tool failure for a process that exited with `code`.
    pub fn tool_exited(tool: impl Into<String>, code: Option<i32>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            code,
            message: message.into(),
        }
    }

    /// Create a file system error for `path`.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Attach the file being processed to an error.
    pub fn for_file(self, path: impl Into<PathBuf>) -> Self {
        Self::Job {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any [`Error::Job`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Job { source, .. } => source.root(),
            other => other,
        }
    }
}
