//! Package manager invocation.
//! The generated project's dependencies are installed by running the
//! configured package manager as a blocking subprocess.

use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::{Error, Result};

/// Bootstraps a package manifest and installs packages into a project.
pub trait PackageManager {
    /// Creates the package manifest in `project_dir` (`npm init -y`).
    fn init(&self, project_dir: &Path) -> Result<()>;

    /// Installs `packages` into `project_dir`.
    fn install(&self, project_dir: &Path, packages: &[String]) -> Result<()>;
}

/// Runs a package manager executable (`npm`, `pnpm`, `yarn`, ...).
pub struct CommandPackageManager {
    program: String,
}

impl CommandPackageManager {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    fn run(&self, project_dir: &Path, args: &[&str]) -> Result<()> {
        let command = std::iter::once(self.program.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        info!("Running '{}' in {}", command, project_dir.display());

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::SubprocessError { command: command.clone(), reason: e.to_string() })?;

        if !status.success() {
            return Err(Error::SubprocessError {
                command,
                reason: format!("exited with {status}"),
            });
        }

        debug!("'{}' completed", command);
        Ok(())
    }
}

impl PackageManager for CommandPackageManager {
    fn init(&self, project_dir: &Path) -> Result<()> {
        self.run(project_dir, &["init", "-y"])
    }

    fn install(&self, project_dir: &Path, packages: &[String]) -> Result<()> {
        if packages.is_empty() {
            debug!("No packages to install");
            return Ok(());
        }
        let mut args = vec!["install"];
        args.extend(packages.iter().map(String::as_str));
        self.run(project_dir, &args)
    }
}

/// Used with `--skip-install`: logs what would run and does nothing.
pub struct SkipPackageManager;

impl PackageManager for SkipPackageManager {
    fn init(&self, project_dir: &Path) -> Result<()> {
        info!("Skipping package manifest creation in {}", project_dir.display());
        Ok(())
    }

    fn install(&self, project_dir: &Path, packages: &[String]) -> Result<()> {
        info!("Skipping install of [{}] in {}", packages.join(", "), project_dir.display());
        Ok(())
    }
}
