use clap::Parser;
use langstrip_remux::{FailurePolicy, RemuxSettings, StderrPolicy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "langstrip")]
#[command(
    author,
    version,
    about = "Keep only one audio language in every container of a directory"
)]
pub struct Cli {
    /// Directory containing the files to process (surrounding quotes are ignored)
    pub directory: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Audio language to keep (e.g. "ja", "jpn")
    #[arg(short, long)]
    pub language: Option<String>,

    /// Container extension to match, ignoring case ("mkv" also rewrites ".MKV" files)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Suffix for the intermediate output file name
    #[arg(long)]
    pub suffix: Option<String>,

    /// Remuxer executable (name on PATH or file path)
    #[arg(long)]
    pub tool: Option<PathBuf>,

    /// Keep processing remaining files after a failure
    #[arg(long)]
    pub continue_on_error: bool,

    /// Log remuxer stderr output instead of failing the file
    #[arg(long)]
    pub allow_stderr: bool,

    /// Show what would be done without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Check that the remuxer is available and exit
    #[arg(long)]
    pub check_tool: bool,
}

impl Cli {
    /// Apply command-line overrides on top of configured settings.
    pub fn apply_to(&self, settings: &mut RemuxSettings) {
        if let Some(ref language) = self.language {
            settings.language_code = language.clone();
        }
        if let Some(ref extension) = self.extension {
            settings.extension = extension.clone();
        }
        if let Some(ref suffix) = self.suffix {
            settings.suffix = suffix.clone();
        }
        if let Some(ref tool) = self.tool {
            settings.tool_path = tool.clone();
        }
        if self.continue_on_error {
            settings.on_error = FailurePolicy::Continue;
        }
        if self.allow_stderr {
            settings.stderr = StderrPolicy::Warn;
        }
    }
}
