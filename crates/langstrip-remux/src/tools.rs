//! Remuxer discovery.

use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Information about the remuxing tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Name the tool was configured with.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Human-readable name of a configured tool, used in logs and errors.
pub fn tool_name(tool: &Path) -> String {
    tool.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| tool.to_string_lossy().to_string())
}

/// Resolve the configured tool to an executable path.
///
/// A configured value with a directory component (`./mkvmerge.exe`,
/// `/opt/mkvtoolnix/mkvmerge`) must exist as a file. A bare program name is
/// looked up on `PATH`.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] if the tool cannot be located.
pub fn resolve_tool(tool: &Path) -> Result<PathBuf> {
    let has_dir = tool
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty());

    if has_dir || tool.is_absolute() {
        if tool.is_file() {
            return Ok(tool.to_path_buf());
        }
        return Err(Error::tool_not_found(tool.to_string_lossy()));
    }

    which::which(tool).map_err(|_| Error::tool_not_found(tool.to_string_lossy()))
}

/// Check whether the tool is available and read its version.
pub fn check_tool(tool: &Path) -> ToolInfo {
    let name = tool_name(tool);

    let Ok(path) = resolve_tool(tool) else {
        return ToolInfo {
            name,
            available: false,
            version: None,
            path: None,
        };
    };

    let version = Command::new(&path)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| {
            String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string())
        });

    ToolInfo {
        name,
        available: true,
        version,
        path: Some(path),
    }
}
