//! Shared fixtures for CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A stand-in for mkvmerge.
///
/// Appends its arguments to `invocations.log` and writes
/// `filtered:<input contents>` to the `--output` path. Inputs whose name
/// contains `fail` exit 2; inputs containing `warn` also write to stderr.
pub struct FakeTool {
    _dir: TempDir,
    pub path: PathBuf,
    pub log: PathBuf,
}

#[cfg(unix)]
impl FakeTool {
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mkvmerge");
        let log = dir.path().join("invocations.log");
        let script = format!(
            r#"#!/bin/sh
echo "$@" >> "{log}"
out="$2"
in="$5"
name=$(basename "$in")
case "$name" in
  *fail*) echo "Error: cannot open $in"; exit 2 ;;
esac
printf 'filtered:' > "$out"
cat "$in" >> "$out"
case "$name" in
  *warn*) echo "Warning: odd track" >&2 ;;
esac
echo "Multiplexing took 0 seconds."
"#,
            log = log.display()
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            _dir: dir,
            path,
            log,
        }
    }

    /// Argument lines of every invocation so far.
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

/// Create a media directory holding the given `(name, contents)` files.
pub fn media_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}
