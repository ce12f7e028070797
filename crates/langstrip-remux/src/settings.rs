//! Settings that drive a batch run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Error, Result};

/// What a batch does after one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing file; later files are never attempted.
    #[default]
    FailFast,
    /// Record the failure and move on to the next file.
    Continue,
}

/// How output on the tool's error stream is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StderrPolicy {
    /// Any stderr output fails the file, even if the tool would exit 0.
    #[default]
    Fatal,
    /// Log stderr output and let the exit code decide.
    Warn,
}

/// Settings for filtering audio tracks across a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemuxSettings {
    /// Container extension to match, with or without the leading dot.
    pub extension: String,
    /// Language of the audio tracks to keep (e.g. "ja", "jpn").
    pub language_code: String,
    /// Inserted between the file stem and extension for the intermediate output.
    pub suffix: String,
    /// Remuxer executable: a bare name looked up on `PATH`, or a file path.
    pub tool_path: PathBuf,
    pub on_error: FailurePolicy,
    pub stderr: StderrPolicy,
}

impl Default for RemuxSettings {
    fn default() -> Self {
        Self {
            extension: "mkv".into(),
            language_code: "ja".into(),
            suffix: "_noaudio".into(),
            tool_path: PathBuf::from("mkvmerge"),
            on_error: FailurePolicy::default(),
            stderr: StderrPolicy::default(),
        }
    }
}

impl RemuxSettings {
    /// The configured extension without a leading dot.
    pub fn bare_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// Whether `ext` (no leading dot) is the configured container extension.
    pub fn matches_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case(self.bare_extension())
    }

    /// Reject settings that would produce an output path equal to its input,
    /// or an invocation the tool cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.bare_extension().is_empty() {
            return Err(Error::InvalidConfig("extension must not be empty".into()));
        }
        if self.suffix.is_empty() {
            return Err(Error::InvalidConfig(
                "suffix must not be empty; the output would overwrite its input".into(),
            ));
        }
        if self.suffix.contains(['/', '\\']) {
            return Err(Error::InvalidConfig(format!(
                "suffix '{}' must not contain a path separator",
                self.suffix
            )));
        }
        if self.language_code.trim().is_empty() {
            return Err(Error::InvalidConfig("language_code must not be empty".into()));
        }
        if self.tool_path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("tool_path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = RemuxSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bare_extension(), "mkv");
        assert_eq!(settings.on_error, FailurePolicy::FailFast);
        assert_eq!(settings.stderr, StderrPolicy::Fatal);
    }

    #[test]
    fn extension_matching_ignores_dot_and_case() {
        let settings = RemuxSettings {
            extension: ".mkv".into(),
            ..Default::default()
        };
        assert!(settings.matches_extension("mkv"));
        assert!(settings.matches_extension("MKV"));
        assert!(!settings.matches_extension("mp4"));
        assert!(!settings.matches_extension("mkv2"));
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let settings = RemuxSettings {
            suffix: String::new(),
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn separator_in_suffix_is_rejected() {
        let settings = RemuxSettings {
            suffix: "/tmp".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn blank_language_is_rejected() {
        let settings = RemuxSettings {
            language_code: "  ".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn policies_use_kebab_case() {
        let json = serde_json::to_string(&FailurePolicy::FailFast).unwrap();
        assert_eq!(json, "\"fail-fast\"");
        let policy: StderrPolicy = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(policy, StderrPolicy::Warn);
    }
}
