//! Single-file and directory processing.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::command::{ToolCommand, ToolOutput};
use crate::job::Job;
use crate::replace::{discard_output, ensure_output_free, replace_original};
use crate::settings::{FailurePolicy, RemuxSettings};
use crate::tools::resolve_tool;
use crate::{Error, Result};

/// A file that could not be processed under [`FailurePolicy::Continue`].
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of a directory run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Directory that was processed, after quote stripping.
    pub directory: PathBuf,
    /// Originals that now hold filtered output, in processing order.
    pub processed: Vec<PathBuf>,
    /// Files that failed; always empty under [`FailurePolicy::FailFast`].
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Turn a raw directory argument into a path.
///
/// Shells on some platforms pass a trailing or surrounding `"` through to the
/// program, so every quote character is removed.
///
/// # Errors
///
/// Returns [`Error::MissingDirectory`] if no argument was given or nothing is
/// left after stripping quotes and whitespace.
pub fn directory_from_arg(arg: Option<&str>) -> Result<PathBuf> {
    let raw = arg.ok_or(Error::MissingDirectory)?;
    let cleaned: String = raw.chars().filter(|&c| c != '"').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(Error::MissingDirectory);
    }
    Ok(PathBuf::from(cleaned))
}

/// Filters the audio tracks of every matching container in a directory.
#[derive(Debug, Clone)]
pub struct Remuxer {
    settings: RemuxSettings,
}

impl Remuxer {
    /// Create a remuxer after validating its settings.
    pub fn new(settings: RemuxSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RemuxSettings {
        &self.settings
    }

    /// List the jobs for `directory`, one level deep, sorted by file name.
    ///
    /// Entries that are not regular files or do not carry the configured
    /// extension are skipped.
    pub async fn jobs(&self, directory: &Path) -> Result<Vec<Job>> {
        let mut entries = tokio::fs::read_dir(directory)
            .await
            .map_err(|e| Error::fs(directory, e))?;

        let mut inputs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::fs(directory, e))?
        {
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| self.settings.matches_extension(ext));
            if !matches {
                continue;
            }

            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => inputs.push(path),
                Ok(_) => tracing::debug!("Skipping non-file entry {:?}", path),
                Err(e) => return Err(Error::fs(&path, e)),
            }
        }

        inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let jobs = inputs
            .into_iter()
            .map(|input| Job::new(input, &self.settings.suffix, &self.settings.language_code))
            .collect::<Result<Vec<_>>>()?;

        for job in &jobs {
            if tokio::fs::symlink_metadata(&job.output).await.is_ok() {
                tracing::warn!(
                    "Output name {:?} is already taken; {:?} will not be processed",
                    job.output,
                    job.input
                );
            }
        }

        Ok(jobs)
    }

    /// Build the invocation for one job.
    pub fn command(&self, job: &Job) -> Result<ToolCommand> {
        let mut cmd = job.command(&self.settings.tool_path)?;
        cmd.stderr_policy(self.settings.stderr);
        Ok(cmd)
    }

    /// Run the tool for one job, leaving the output beside the input.
    ///
    /// Fails without running the tool if the output path already exists. A
    /// partial output is removed if the tool fails.
    pub async fn process_file(&self, job: &Job) -> Result<ToolOutput> {
        let cmd = self.command(job)?;
        ensure_output_free(job).await?;
        tracing::debug!("Running {}", cmd.display());

        match cmd.execute().await {
            Ok(output) => Ok(output),
            Err(e) => {
                discard_output(job).await;
                Err(e)
            }
        }
    }

    /// Run the tool for one job and replace the original with its output.
    pub async fn process_job(&self, job: &Job) -> Result<()> {
        self.process_file(job).await?;
        tracing::info!("Successfully removed audio for {:?}", job.input);
        replace_original(job).await
    }

    /// Process every matching file in the directory named by `arg`.
    ///
    /// Files are handled strictly one after another. Under
    /// [`FailurePolicy::FailFast`] the first failure is returned as
    /// [`Error::Job`]; files already processed stay replaced and later files
    /// are not attempted.
    pub async fn run_directory(&self, arg: Option<&str>) -> Result<BatchReport> {
        let directory = directory_from_arg(arg)?;

        resolve_tool(&self.settings.tool_path)?;

        let jobs = self.jobs(&directory).await?;
        tracing::info!(
            "Found {} .{} file(s) in {:?}",
            jobs.len(),
            self.settings.bare_extension(),
            directory
        );

        let mut report = BatchReport {
            directory,
            ..Default::default()
        };

        let total = jobs.len();
        for (i, job) in jobs.iter().enumerate() {
            tracing::info!("[{}/{}] Processing {:?}", i + 1, total, job.input);

            match self.process_job(job).await {
                Ok(()) => report.processed.push(job.input.clone()),
                Err(e) => {
                    let e = e.for_file(&job.input);
                    match self.settings.on_error {
                        FailurePolicy::FailFast => {
                            tracing::error!("{}", e);
                            return Err(e);
                        }
                        FailurePolicy::Continue => {
                            tracing::error!("{}; continuing", e);
                            report.failed.push(FileFailure {
                                path: job.input.clone(),
                                error: e.root().to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(report)
    }

    /// Commands a run of `arg` would execute, without running them.
    pub async fn plan(&self, arg: Option<&str>) -> Result<Vec<(Job, ToolCommand)>> {
        let directory = directory_from_arg(arg)?;
        let jobs = self.jobs(&directory).await?;
        jobs.into_iter()
            .map(|job| {
                let cmd = self.command(&job)?;
                Ok((job, cmd))
            })
            .collect()
    }
}
