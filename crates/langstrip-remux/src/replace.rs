//! In-place replacement of originals by filtered output.

use crate::job::Job;
use crate::{Error, Result};

/// Move the job's output over its input.
///
/// After this returns `Ok`, the output path no longer exists and the input
/// path holds the filtered container.
pub async fn replace_original(job: &Job) -> Result<()> {
    if !tokio::fs::try_exists(&job.output)
        .await
        .map_err(|e| Error::fs(&job.output, e))?
    {
        return Err(Error::fs(
            &job.output,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "tool reported success but wrote no output",
            ),
        ));
    }

    tokio::fs::rename(&job.output, &job.input)
        .await
        .map_err(|e| Error::fs(&job.input, e))
}

/// Fail if the job's output path is already taken.
///
/// The output name may belong to a file the user owns (for instance a
/// container already carrying the suffix); it is never overwritten or removed.
pub async fn ensure_output_free(job: &Job) -> Result<()> {
    match tokio::fs::symlink_metadata(&job.output).await {
        Ok(_) => Err(Error::fs(
            &job.output,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "intermediate output already exists; refusing to overwrite it",
            ),
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::fs(&job.output, e)),
    }
}

/// Remove a partially written output after a failed run.
///
/// Only call this once [`ensure_output_free`] has passed for the job, so the
/// file can only have been written by this run.
pub async fn discard_output(job: &Job) {
    match tokio::fs::remove_file(&job.output).await {
        Ok(()) => tracing::debug!("Removed partial output {:?}", job.output),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove partial output {:?}: {}", job.output, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_replace_moves_output_over_input() {
        let dir = tempdir().unwrap();
        let job = Job::new(dir.path().join("a.mkv"), "_noaudio", "ja").unwrap();
        std::fs::write(&job.input, b"original").unwrap();
        std::fs::write(&job.output, b"filtered").unwrap();

        replace_original(&job).await.unwrap();

        assert_eq!(std::fs::read(&job.input).unwrap(), b"filtered");
        assert!(!job.output.exists());
    }

    #[tokio::test]
    async fn test_replace_without_output_leaves_input() {
        let dir = tempdir().unwrap();
        let job = Job::new(dir.path().join("a.mkv"), "_noaudio", "ja").unwrap();
        std::fs::write(&job.input, b"original").unwrap();

        let err = replace_original(&job).await.unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
        assert_eq!(std::fs::read(&job.input).unwrap(), b"original");
    }

    #[tokio::test]
    async fn test_ensure_output_free_rejects_existing_file() {
        let dir = tempdir().unwrap();
        let job = Job::new(dir.path().join("a.mkv"), "_noaudio", "ja").unwrap();
        std::fs::write(&job.output, b"mine").unwrap();

        let err = ensure_output_free(&job).await.unwrap_err();
        match err {
            Error::FileSystem { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists)
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(std::fs::read(&job.output).unwrap(), b"mine");
    }

    #[tokio::test]
    async fn test_ensure_output_free_accepts_missing_file() {
        let dir = tempdir().unwrap();
        let job = Job::new(dir.path().join("a.mkv"), "_noaudio", "ja").unwrap();
        assert!(ensure_output_free(&job).await.is_ok());
    }

    #[tokio::test]
    async fn test_discard_output_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let job = Job::new(dir.path().join("a.mkv"), "_noaudio", "ja").unwrap();
        std::fs::write(&job.output, b"partial").unwrap();

        discard_output(&job).await;
        assert!(!job.output.exists());
        discard_output(&job).await;
    }
}
