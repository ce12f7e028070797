//! # langstrip-remux
//!
//! Keep a single audio language in every container of a directory.
//!
//! This crate provides:
//! - **Tool discovery** ([`resolve_tool`], [`check_tool`]) for the remuxer
//!   (mkvmerge by default).
//! - **Jobs** ([`Job`]) that derive the intermediate output path and the
//!   remuxer arguments for one file.
//! - **Command execution** ([`ToolCommand`]) with streamed stdout and a
//!   configurable stderr policy.
//! - **Directory processing** ([`Remuxer`]) that runs jobs one at a time and
//!   renames each output over its original.
//!
//! ## Example
//!
//! ```no_run
//! use langstrip_remux::{RemuxSettings, Remuxer};
//!
//! # async fn example() -> langstrip_remux::Result<()> {
//! let remuxer = Remuxer::new(RemuxSettings::default())?;
//! let report = remuxer.run_directory(Some("/media/anime/season-1")).await?;
//! for path in &report.processed {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
mod error;
pub mod job;
pub mod processor;
pub mod replace;
pub mod settings;
pub mod tools;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use job::Job;
pub use processor::{directory_from_arg, BatchReport, FileFailure, Remuxer};
pub use settings::{FailurePolicy, RemuxSettings, StderrPolicy};
pub use tools::{check_tool, resolve_tool, ToolInfo};
