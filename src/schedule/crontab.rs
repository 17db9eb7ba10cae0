//! User crontab integration.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{MeerkatError, Result};

use super::Scheduler;

/// Name of the crontab tool.
pub const CRONTAB: &str = "crontab";

/// Registers jobs in the current user's crontab.
#[derive(Debug, Clone)]
pub struct CrontabScheduler {
    program: PathBuf,
}

impl CrontabScheduler {
    /// Use `crontab` from PATH.
    pub fn new() -> Self {
        Self::with_program(CRONTAB)
    }

    /// Use a specific `crontab` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Read the current crontab; a user without one has an empty table.
    fn read_table(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("-l")
            .output()
            .map_err(|e| MeerkatError::Scheduler {
                message: format!("failed to run crontab -l: {}", e),
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("no crontab") {
            return Ok(String::new());
        }

        Err(MeerkatError::Scheduler {
            message: format!("crontab -l failed: {}", stderr.trim()),
        })
    }

    /// Replace the crontab with new content.
    fn write_table(&self, content: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MeerkatError::Scheduler {
                message: format!("failed to run crontab: {}", e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(content.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(MeerkatError::Scheduler {
                message: format!(
                    "crontab install failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}

impl Default for CrontabScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for CrontabScheduler {
    fn is_available(&self) -> bool {
        true
    }

    fn has_existing_entry(&self, command: &str) -> Result<bool> {
        let table = self.read_table()?;
        Ok(table
            .lines()
            .filter_map(job_command)
            .any(|existing| existing == command.trim()))
    }

    fn register_at_boot(&mut self, command: &str) -> Result<()> {
        let table = self.read_table()?;
        let updated = append_boot_job(&table, command);
        self.write_table(&updated)?;
        tracing::info!("Registered @reboot job: {}", command);
        Ok(())
    }
}

/// Extract the command part of a crontab line.
///
/// Returns `None` for blank lines, comments, and environment assignments.
pub fn job_command(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let schedule_fields = if line.starts_with('@') { 1 } else { 5 };

    let mut rest = line;
    for _ in 0..schedule_fields {
        let (field, tail) = rest.split_once(char::is_whitespace)?;
        if field.contains('=') {
            return None;
        }
        rest = tail.trim_start();
    }

    if rest.is_empty() {
        None
    } else {
        Some(rest.trim_end())
    }
}

/// Append an `@reboot` job to crontab content.
pub fn append_boot_job(table: &str, command: &str) -> String {
    let mut updated = table.to_string();
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&format!("@reboot {}\n", command.trim()));
    updated
}
