//! Per-file jobs and the remuxer argument builder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::command::ToolCommand;
use crate::tools::resolve_tool;
use crate::{Error, Result};

/// One container to filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// The original file; replaced once the tool succeeds.
    pub input: PathBuf,
    /// Intermediate output next to the input: `<stem><suffix>.<ext>`.
    pub output: PathBuf,
    /// Audio language to keep.
    pub language: String,
}

impl Job {
    /// Derive the job for `input`, placing the output beside it.
    ///
    /// The output keeps the input's own extension (including its case) and
    /// inserts `suffix` after the stem, so it never equals the input path
    /// while `suffix` is non-empty.
    pub fn new(input: impl Into<PathBuf>, suffix: &str, language: impl Into<String>) -> Result<Self> {
        let input = input.into();
        let output = output_path(&input, suffix)?;
        Ok(Self {
            input,
            output,
            language: language.into(),
        })
    }

    /// Ordered tool arguments: output path, language filter, input path.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "--output".into(),
            self.output.clone().into_os_string(),
            "--audio-tracks".into(),
            self.language.clone().into(),
            self.input.clone().into_os_string(),
        ]
    }

    /// Build the remuxer invocation for this job.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if `tool` cannot be resolved.
    pub fn command(&self, tool: &Path) -> Result<ToolCommand> {
        let program = resolve_tool(tool)?;
        let mut cmd = ToolCommand::new(program);
        cmd.args(self.args());
        Ok(cmd)
    }
}

fn output_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    if suffix.is_empty() {
        return Err(Error::InvalidConfig(
            "suffix must not be empty; the output would overwrite its input".into(),
        ));
    }

    let stem = input
        .file_stem()
        .ok_or_else(|| Error::InvalidConfig(format!("not a file path: {}", input.display())))?;

    let mut name = stem.to_os_string();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    Ok(input.with_file_name(name))
}
