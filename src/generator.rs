//! External site generator invocation.
//!
//! The generator owns page rendering; the pipeline only spawns it. The child
//! inherits stdio so its own output lands in the terminal, and its exit
//! status is the whole contract: non-zero means the task failed.

use crate::config::GeneratorConfig;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("generator command not found: {0}")]
    CommandNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("generator `{command}` failed: {status}")]
    Failed { command: String, status: ExitStatus },
}

/// The generator invocation as a display string, e.g. for reports.
pub fn command_line(config: &GeneratorConfig) -> String {
    let mut line = config.command.clone();
    for arg in &config.args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Run the generator in the project root and wait for it.
pub fn run(config: &GeneratorConfig, root: &Path) -> Result<(), GeneratorError> {
    let status = Command::new(&config.command)
        .args(&config.args)
        .current_dir(root)
        .status()
        .map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                GeneratorError::CommandNotFound(config.command.clone())
            } else {
                GeneratorError::Io(err)
            }
        })?;

    if !status.success() {
        return Err(GeneratorError::Failed {
            command: command_line(config),
            status,
        });
    }
    Ok(())
}
